//! Alert model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{AlertPriority, AlertStatus, AlertType};
use super::user::Location;

/// Alert raised for a tourist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub tourist_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    pub priority: AlertPriority,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_officer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Create alert request (internal, used by the panic flow and seeding)
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub tourist_id: String,
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub message: String,
    pub location: Location,
}

/// Update alert request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlert {
    pub status: Option<AlertStatus>,
    pub assigned_officer_id: Option<String>,
}

/// Query parameters for alert listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct AlertQuery {
    /// Filter by status
    pub status: Option<AlertStatus>,
    /// Maximum number of alerts (default 50)
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}

impl AlertQuery {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PanicResponse {
    pub message: String,
    pub alert_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallResponse {
    pub message: String,
    pub call_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignResponse {
    pub message: String,
    pub alert: Alert,
}
