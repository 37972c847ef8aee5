//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Dashboard role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tourist,
    Police,
    Tourism,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tourist => "tourist",
            Role::Police => "police",
            Role::Tourism => "tourism",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tourist" => Ok(Role::Tourist),
            "police" => Ok(Role::Police),
            "tourism" => Ok(Role::Tourism),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// KYC
// ---------------------------------------------------------------------------

/// Identity verification status of a tourist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Panic,
    Geofence,
    Safety,
    Health,
}

/// Alert lifecycle. Transitions only move forward:
/// active -> acknowledged -> resolved (acknowledging may be skipped).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }

    /// Whether moving from `self` to `next` keeps the lifecycle forward-only.
    /// Re-applying the current status is accepted as a no-op.
    pub fn can_transition_to(&self, next: AlertStatus) -> bool {
        next >= *self
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AlertStatus::Active),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            _ => Err(format!("Invalid alert status: {}", s)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

// ---------------------------------------------------------------------------
// Trips
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}
