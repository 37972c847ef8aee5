//! Trip model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::TripStatus;
use super::user::EmergencyContact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub tourist_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub transport_mode: Option<String>,
    pub stay_info: Option<String>,
    pub health_info: Option<String>,
    pub status: TripStatus,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmergencyContact {
    #[validate(length(min = 1))]
    pub name: String,
    pub relationship: String,
    #[validate(length(min = 3))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Create trip request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_trip_dates"))]
pub struct CreateTrip {
    #[validate(length(min = 1, message = "Destination is required"))]
    pub destination: String,
    /// Start date (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// End date (YYYY-MM-DD)
    pub end_date: NaiveDate,
    pub transport_mode: Option<String>,
    pub stay_info: Option<String>,
    pub health_info: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub emergency_contacts: Vec<CreateEmergencyContact>,
}

fn validate_trip_dates(trip: &CreateTrip) -> Result<(), ValidationError> {
    if trip.end_date < trip.start_date {
        return Err(ValidationError::new("end_date_before_start_date"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_dates_validation() {
        let trip = CreateTrip {
            destination: "Goa".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            transport_mode: None,
            stay_info: None,
            health_info: None,
            emergency_contacts: vec![],
        };
        assert!(trip.validate().is_err());
    }
}
