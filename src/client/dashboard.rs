//! View-models of the three dashboards

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    models::{
        statistics::{
            InfluxSeries, LanguageShare, PoliceDashboardStats, RecentActivity, SafetyMetrics,
            TopDestination,
        },
        Alert, AlertStatus, KycStatus, Tourist, TripStatistic,
    },
    services::safety::SafetyLevel,
};

use super::api::DashboardApi;

/// Scores at or above this count as safe in the police tourist table
pub const SAFE_SCORE_THRESHOLD: f64 = 7.0;

/// Rows per page of the tourism registry
pub const REGISTRY_PAGE_SIZE: usize = 10;

/// Seconds between pressing the panic button and sending the alert
pub const PANIC_COUNTDOWN_SECS: u32 = 5;

/// Label of a safety score card
pub fn safety_label(score: f64) -> &'static str {
    SafetyLevel::from_score(score).label()
}

fn matches_search(tourist: &Tourist, search: &str) -> bool {
    let needle = search.to_lowercase();
    tourist.name().to_lowercase().contains(&needle)
        || tourist.digital_id.to_lowercase().contains(&needle)
        || tourist.destination.to_lowercase().contains(&needle)
}

// ---------------------------------------------------------------------------
// Police tourist table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafetyFilter {
    #[default]
    All,
    Safe,
    Attention,
}

#[derive(Debug, Clone, Default)]
pub struct TouristTableFilter {
    pub search: String,
    pub safety: SafetyFilter,
}

impl TouristTableFilter {
    pub fn apply<'a>(&self, tourists: &'a [Tourist]) -> Vec<&'a Tourist> {
        tourists
            .iter()
            .filter(|t| matches_search(t, &self.search))
            .filter(|t| match self.safety {
                SafetyFilter::All => true,
                SafetyFilter::Safe => t.safety_score >= SAFE_SCORE_THRESHOLD,
                SafetyFilter::Attention => t.safety_score < SAFE_SCORE_THRESHOLD,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tourism registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RegistryFilter {
    pub search: String,
    /// `None` shows every KYC status
    pub kyc: Option<KycStatus>,
    /// 1-based page number
    pub page: usize,
}

impl Default for RegistryFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            kyc: None,
            page: 1,
        }
    }
}

#[derive(Debug)]
pub struct RegistryPage<'a> {
    pub tourists: Vec<&'a Tourist>,
    /// Matching tourists across all pages
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl RegistryPage<'_> {
    /// "Showing X to Y of Z results"
    pub fn summary(&self) -> String {
        let start = (self.page.max(1) - 1) * REGISTRY_PAGE_SIZE;
        let end = (start + REGISTRY_PAGE_SIZE).min(self.total);
        format!("Showing {} to {} of {} results", start + 1, end, self.total)
    }
}

impl RegistryFilter {
    pub fn apply<'a>(&self, tourists: &'a [Tourist]) -> RegistryPage<'a> {
        let matching: Vec<&Tourist> = tourists
            .iter()
            .filter(|t| matches_search(t, &self.search))
            .filter(|t| self.kyc.map_or(true, |kyc| t.kyc_status == kyc))
            .collect();

        let total = matching.len();
        let page = self.page.max(1);
        let start = (page - 1) * REGISTRY_PAGE_SIZE;
        RegistryPage {
            tourists: matching
                .into_iter()
                .skip(start)
                .take(REGISTRY_PAGE_SIZE)
                .collect(),
            total,
            page,
            total_pages: total.div_ceil(REGISTRY_PAGE_SIZE),
        }
    }
}

// ---------------------------------------------------------------------------
// Alert panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertFilter {
    All,
    #[default]
    Active,
    Acknowledged,
}

impl AlertFilter {
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts
            .iter()
            .filter(|a| match self {
                AlertFilter::All => true,
                AlertFilter::Active => a.status == AlertStatus::Active,
                AlertFilter::Acknowledged => a.status == AlertStatus::Acknowledged,
            })
            .collect()
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            AlertFilter::Active => "No active alerts",
            AlertFilter::All | AlertFilter::Acknowledged => "No alerts found",
        }
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PoliceDashboard {
    pub alerts: Vec<Alert>,
    pub tourists: Vec<Tourist>,
    pub stats: PoliceDashboardStats,
}

impl PoliceDashboard {
    pub async fn load(api: &DashboardApi) -> Self {
        let (alerts, tourists, stats) = tokio::join!(
            api.fetch_alerts(),
            api.fetch_police_tourists(),
            api.fetch_police_stats(),
        );
        Self {
            alerts,
            tourists,
            stats,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TourismDashboard {
    pub tourists: Vec<Tourist>,
    pub statistics: TripStatistic,
    pub influx: InfluxSeries,
    pub top_destinations: Vec<TopDestination>,
    pub languages: Vec<LanguageShare>,
    pub safety_metrics: SafetyMetrics,
    pub recent_activities: Vec<RecentActivity>,
}

impl TourismDashboard {
    pub async fn load(api: &DashboardApi) -> Self {
        let (
            tourists,
            statistics,
            influx,
            top_destinations,
            languages,
            safety_metrics,
            recent_activities,
        ) = tokio::join!(
            api.fetch_tourists(),
            api.fetch_trip_statistics(),
            api.fetch_influx("day"),
            api.fetch_top_destinations(),
            api.fetch_language_distribution(),
            api.fetch_safety_metrics(),
            api.fetch_recent_activities(10),
        );
        Self {
            tourists,
            statistics,
            influx,
            top_destinations,
            languages,
            safety_metrics,
            recent_activities,
        }
    }
}

// ---------------------------------------------------------------------------
// Geofence notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoNoticeKind {
    Warning,
    Danger,
    Safe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoNotice {
    pub id: String,
    pub kind: GeoNoticeKind,
    pub title: String,
    pub message: String,
    pub location: String,
    pub timestamp: String,
}

/// Zone notices shown on the tourist dashboard. Display only: nothing here
/// decides whether a tourist is inside a zone.
#[derive(Debug, Clone, Default)]
pub struct GeoFenceFeed {
    notices: Vec<GeoNotice>,
}

impl GeoFenceFeed {
    pub fn new(notices: Vec<GeoNotice>) -> Self {
        Self { notices }
    }

    pub fn demo() -> Self {
        Self::new(vec![
            GeoNotice {
                id: "1".into(),
                kind: GeoNoticeKind::Warning,
                title: "High Tourist Activity Zone".into(),
                message: "You are entering a crowded area. Stay alert and keep your belongings secure.".into(),
                location: "Calangute Beach Main Area".into(),
                timestamp: "2 minutes ago".into(),
            },
            GeoNotice {
                id: "2".into(),
                kind: GeoNoticeKind::Safe,
                title: "Safe Zone Entered".into(),
                message: "You are now in a designated safe zone with good security coverage.".into(),
                location: "Tourist Information Center".into(),
                timestamp: "15 minutes ago".into(),
            },
        ])
    }

    pub fn notices(&self) -> &[GeoNotice] {
        &self.notices
    }

    /// Remove a notice; false when no notice has that id
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }
}

// ---------------------------------------------------------------------------
// Panic button
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicState {
    Idle,
    Counting {
        /// Identifies the press that owns this countdown
        press: u64,
        /// Seconds left before the alert is sent
        remaining: u32,
    },
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicOutcome {
    /// The request was made; carries its success flag
    Sent(bool),
    Cancelled,
    AlreadyActive,
}

/// Panic button with a cancellable countdown
pub struct PanicButton {
    seconds: u32,
    tick: Duration,
    presses: AtomicU64,
    state: watch::Sender<PanicState>,
}

impl Default for PanicButton {
    fn default() -> Self {
        Self::new()
    }
}

impl PanicButton {
    pub fn new() -> Self {
        Self::with_timing(PANIC_COUNTDOWN_SECS, Duration::from_secs(1))
    }

    pub fn with_timing(seconds: u32, tick: Duration) -> Self {
        let (state, _) = watch::channel(PanicState::Idle);
        Self {
            seconds,
            tick,
            presses: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> PanicState {
        *self.state.borrow()
    }

    /// Follow countdown updates
    pub fn subscribe(&self) -> watch::Receiver<PanicState> {
        self.state.subscribe()
    }

    /// Stop the running countdown; false when none is running
    pub fn cancel(&self) -> bool {
        self.state.send_if_modified(|state| match state {
            PanicState::Counting { .. } => {
                *state = PanicState::Idle;
                true
            }
            _ => false,
        })
    }

    /// Run the countdown, then raise the panic alert through the API
    pub async fn press(&self, api: &DashboardApi) -> PanicOutcome {
        self.press_with(|| api.trigger_panic()).await
    }

    pub async fn press_with<F, Fut>(&self, send: F) -> PanicOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let press = self.presses.fetch_add(1, Ordering::Relaxed) + 1;
        let started = self.state.send_if_modified(|state| {
            if *state == PanicState::Idle {
                *state = PanicState::Counting {
                    press,
                    remaining: self.seconds,
                };
                true
            } else {
                false
            }
        });
        if !started {
            return PanicOutcome::AlreadyActive;
        }

        let mut changes = self.state.subscribe();
        for remaining in (1..=self.seconds).rev() {
            if !self.advance(press, PanicState::Counting { press, remaining }) {
                return PanicOutcome::Cancelled;
            }
            let _ = changes.borrow_and_update();
            tokio::select! {
                _ = tokio::time::sleep(self.tick) => {}
                _ = changes.changed() => {}
            }
        }
        if !self.advance(press, PanicState::Sending) {
            return PanicOutcome::Cancelled;
        }

        tracing::warn!(press, "panic countdown elapsed, sending alert");
        let sent = send().await;
        self.state.send_replace(PanicState::Idle);
        PanicOutcome::Sent(sent)
    }

    /// Move to `next` while `press` still owns the countdown
    fn advance(&self, press: u64, next: PanicState) -> bool {
        self.state.send_if_modified(|state| match state {
            PanicState::Counting { press: owner, .. } if *owner == press => {
                *state = next;
                true
            }
            _ => false,
        })
    }
}
