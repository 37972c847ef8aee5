//! Statistics service for the police and tourism dashboards

use chrono::Utc;

use crate::{
    error::AppResult,
    fixtures,
    models::{
        statistics::{
            InfluxSeries, LanguageShare, PoliceDashboardStats, RecentActivity, SafetyMetrics,
            TopDestination,
        },
        AlertStatus, TripStatistic,
    },
    repository::Repository,
};

/// Number of destinations reported in trip statistics
pub const TOP_DESTINATIONS: usize = 5;

/// Default number of recent activities
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate counters over the registry, trips and alerts
    pub async fn trip_statistics(&self) -> AppResult<TripStatistic> {
        let (total_tourists, active_tourists, average, incidents, popular_destinations) = tokio::join!(
            self.repository.tourists.count(),
            self.repository.trips.count_active_tourists(),
            self.repository.tourists.average_safety_score(),
            self.repository.alerts.count(),
            self.repository.trips.top_destinations(TOP_DESTINATIONS),
        );

        Ok(TripStatistic {
            total_tourists,
            active_tourists,
            safety_score: (average * 10.0).round() / 10.0,
            incidents,
            popular_destinations,
        })
    }

    pub async fn police_dashboard_stats(&self) -> AppResult<PoliceDashboardStats> {
        let alerts = &self.repository.alerts;
        let today = Utc::now().date_naive();

        Ok(PoliceDashboardStats {
            active_alerts: alerts.count_by_status(AlertStatus::Active).await,
            active_tourists: self.repository.tourists.count().await,
            resolved_today: alerts.count_resolved_on(today).await,
            total_incidents: alerts.count().await,
        })
    }

    pub fn influx(&self, period: Option<&str>) -> InfluxSeries {
        fixtures::influx(period.unwrap_or("day"))
    }

    pub fn top_destinations(&self) -> Vec<TopDestination> {
        fixtures::top_destinations()
    }

    pub fn language_distribution(&self) -> Vec<LanguageShare> {
        fixtures::language_distribution()
    }

    pub fn safety_metrics(&self) -> SafetyMetrics {
        fixtures::safety_metrics()
    }

    pub fn recent_activities(&self, limit: Option<usize>) -> Vec<RecentActivity> {
        let mut activities = fixtures::recent_activities();
        activities.truncate(limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT));
        activities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::CreateTrip;
    use chrono::NaiveDate;

    fn trip(destination: &str) -> CreateTrip {
        CreateTrip {
            destination: destination.into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            transport_mode: None,
            stay_info: None,
            health_info: None,
            emergency_contacts: vec![],
        }
    }

    #[tokio::test]
    async fn test_empty_statistics() {
        let stats = StatsService::new(Repository::new());
        let trip_stats = stats.trip_statistics().await.unwrap();
        assert_eq!(trip_stats.total_tourists, 0);
        assert_eq!(trip_stats.safety_score, 0.0);
        assert!(trip_stats.popular_destinations.is_empty());
    }

    #[tokio::test]
    async fn test_trip_statistics_aggregate() {
        let repository = Repository::new();
        for tourist in fixtures::tourists() {
            repository.tourists.upsert(tourist).await;
        }
        for alert in fixtures::alerts() {
            repository.alerts.insert(alert).await;
        }
        repository.trips.create("tourist-1", trip("Goa")).await;
        repository.trips.create("tourist-2", trip("Kerala")).await;
        repository.trips.create("tourist-2", trip("Goa")).await;

        let stats = StatsService::new(repository);
        let trip_stats = stats.trip_statistics().await.unwrap();
        assert_eq!(trip_stats.total_tourists, 2);
        assert_eq!(trip_stats.active_tourists, 2);
        assert_eq!(trip_stats.safety_score, 8.5);
        assert_eq!(trip_stats.incidents, 2);
        assert_eq!(trip_stats.popular_destinations[0].name, "Goa");
        assert_eq!(trip_stats.popular_destinations[0].count, 2);

        let police = stats.police_dashboard_stats().await.unwrap();
        assert_eq!(police.active_alerts, 1);
        assert_eq!(police.total_incidents, 2);
        assert_eq!(police.resolved_today, 0);
    }

    #[test]
    fn test_recent_activity_limit() {
        let stats = StatsService::new(Repository::new());
        assert_eq!(stats.recent_activities(Some(2)).len(), 2);
        assert_eq!(stats.recent_activities(None).len(), 4);
        assert_eq!(stats.influx(None).data.len(), 12);
        assert!(stats.influx(Some("month")).data.is_empty());
    }
}
