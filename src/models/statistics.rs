//! Statistics and analytics records served to the police and tourism dashboards

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DestinationCount {
    pub name: String,
    pub count: u64,
}

/// Aggregate tourist counters for the tourism dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripStatistic {
    pub total_tourists: u64,
    pub active_tourists: u64,
    /// Average safety score, one decimal
    pub safety_score: f64,
    pub incidents: u64,
    /// Destinations ranked by trip count, highest first
    pub popular_destinations: Vec<DestinationCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoliceDashboardStats {
    pub active_alerts: u64,
    pub active_tourists: u64,
    pub resolved_today: u64,
    pub total_incidents: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InfluxPoint {
    pub time: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InfluxSeries {
    pub period: String,
    pub data: Vec<InfluxPoint>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct InfluxQuery {
    /// Aggregation period; only "day" carries data
    pub period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopDestination {
    pub rank: u32,
    pub name: String,
    pub tourists: u64,
    /// Safety percentage
    pub safety: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LanguageShare {
    pub language: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyMetrics {
    pub low_risk: u64,
    pub medium_risk: u64,
    pub high_risk: u64,
    pub average_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    DigitalId,
    Kyc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentActivity {
    pub id: u32,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub time: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Maximum number of activities (default 10)
    pub limit: Option<usize>,
}
