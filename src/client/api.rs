//! Dashboard data fetchers.
//!
//! Every fetch goes to the remote API once. On any failure the matching demo
//! data set is returned instead, so a view always has something to render.
//! There is no retry, caching or request coalescing.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    config::ClientConfig,
    fixtures,
    models::{
        alert::PanicResponse,
        statistics::{
            InfluxSeries, LanguageShare, PoliceDashboardStats, RecentActivity, SafetyMetrics,
            TopDestination,
        },
        user::clamp_safety_score,
        Alert, AlertStatus, Tourist, TripStatistic,
    },
    services::chatbot::{Chatbot, ChatbotReply},
};

use super::{
    error::ClientResult,
    session::SessionStore,
    transport::ApiTransport,
};

pub struct DashboardApi {
    transport: ApiTransport,
    session: SessionStore,
    chatbot: Chatbot,
}

impl DashboardApi {
    pub fn new(transport: ApiTransport, session: SessionStore) -> Self {
        Self {
            transport,
            session,
            chatbot: Chatbot::new(),
        }
    }

    pub fn from_config(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        Ok(Self::new(ApiTransport::from_config(config)?, session))
    }

    async fn get_or<T, F>(&self, path: &str, query: &[(&str, String)], fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let token = self.session.access_token();
        match self
            .transport
            .get_with_query(path, query, token.as_deref())
            .await
        {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path, error = %e, "fetch failed, using demo data");
                fallback()
            }
        }
    }

    /// Report a mutation as successful even when the API rejected it
    fn settle<T>(&self, action: &str, result: ClientResult<T>) -> bool {
        if let Err(e) = result {
            tracing::warn!(action, error = %e, "remote call failed, treating as done");
        }
        true
    }

    pub async fn fetch_tourists(&self) -> Vec<Tourist> {
        self.get_or("/tourism/tourists", &[], fixtures::tourists).await
    }

    /// Tourist table of the police dashboard
    pub async fn fetch_police_tourists(&self) -> Vec<Tourist> {
        self.get_or("/police/tourists", &[], fixtures::tourists).await
    }

    pub async fn fetch_alerts(&self) -> Vec<Alert> {
        self.get_or("/police/alerts", &[], fixtures::alerts).await
    }

    pub async fn fetch_trip_statistics(&self) -> TripStatistic {
        self.get_or("/tourism/statistics", &[], fixtures::trip_statistics)
            .await
    }

    pub async fn fetch_police_stats(&self) -> PoliceDashboardStats {
        self.get_or("/police/dashboard/stats", &[], fixtures::police_dashboard_stats)
            .await
    }

    pub async fn fetch_influx(&self, period: &str) -> InfluxSeries {
        self.get_or(
            "/tourism/analytics/influx",
            &[("period", period.to_string())],
            || fixtures::influx(period),
        )
        .await
    }

    pub async fn fetch_top_destinations(&self) -> Vec<TopDestination> {
        self.get_or("/tourism/analytics/destinations", &[], fixtures::top_destinations)
            .await
    }

    pub async fn fetch_language_distribution(&self) -> Vec<LanguageShare> {
        self.get_or("/tourism/analytics/languages", &[], fixtures::language_distribution)
            .await
    }

    pub async fn fetch_safety_metrics(&self) -> SafetyMetrics {
        self.get_or("/tourism/analytics/safety-metrics", &[], fixtures::safety_metrics)
            .await
    }

    pub async fn fetch_recent_activities(&self, limit: usize) -> Vec<RecentActivity> {
        self.get_or(
            "/tourism/activities/recent",
            &[("limit", limit.to_string())],
            || {
                let mut activities = fixtures::recent_activities();
                activities.truncate(limit);
                activities
            },
        )
        .await
    }

    /// Store the tourist's safety score, clamped into [0, 10]
    pub async fn update_safety_score(&self, score: f64) -> bool {
        let token = self.session.access_token();
        let body = json!({ "safetyScore": clamp_safety_score(score) });
        let result = self
            .transport
            .put::<_, Tourist>("/tourist/profile", &body, token.as_deref())
            .await;
        self.settle("update_safety_score", result)
    }

    pub async fn trigger_panic(&self) -> bool {
        let token = self.session.access_token();
        let result = self
            .transport
            .post::<(), PanicResponse>("/tourist/panic", None, token.as_deref())
            .await;
        if let Ok(response) = &result {
            tracing::info!(alert_id = %response.alert_id, "panic alert raised");
        }
        self.settle("trigger_panic", result)
    }

    pub async fn acknowledge_alert(&self, alert_id: &str) -> bool {
        self.set_alert_status(alert_id, AlertStatus::Acknowledged).await
    }

    pub async fn resolve_alert(&self, alert_id: &str) -> bool {
        self.set_alert_status(alert_id, AlertStatus::Resolved).await
    }

    async fn set_alert_status(&self, alert_id: &str, status: AlertStatus) -> bool {
        let token = self.session.access_token();
        let body = json!({ "status": status });
        let result = self
            .transport
            .put::<_, Alert>(&format!("/police/alerts/{}", alert_id), &body, token.as_deref())
            .await;
        self.settle("set_alert_status", result)
    }

    /// Ask the remote assistant, answering locally when it is unavailable
    pub async fn ask_chatbot(&self, message: &str) -> String {
        let token = self.session.access_token();
        let body = json!({ "message": message });
        match self
            .transport
            .post::<_, ChatbotReply>("/tourist/chatbot", Some(&body), token.as_deref())
            .await
        {
            Ok(reply) => reply.response,
            Err(e) => {
                tracing::warn!(error = %e, "chatbot request failed, answering locally");
                self.chatbot.respond(message).to_string()
            }
        }
    }
}
