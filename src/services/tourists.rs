//! Tourist profile, trip and location service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        trip::CreateTrip,
        user::{UpdateLocation, UpdateLocationResponse, UpdateTouristProfile},
        EmergencyContact, KycStatus, Location, Tourist, Trip,
    },
    repository::Repository,
    services::safety::{SafetyScorer, LOW_SCORE_ALERT_THRESHOLD, RESCORE_THRESHOLD},
};

#[derive(Clone)]
pub struct TouristsService {
    repository: Repository,
    scorer: SafetyScorer,
}

impl TouristsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            scorer: SafetyScorer::new(),
        }
    }

    /// Tourist registry
    pub async fn list(&self) -> Vec<Tourist> {
        self.repository.tourists.list().await
    }

    /// Tourist profile of the given user
    pub async fn get_profile(&self, user_id: &str) -> AppResult<Tourist> {
        self.repository.tourists.get(user_id).await
    }

    /// Update the caller's safety score and phone number
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: UpdateTouristProfile,
    ) -> AppResult<Tourist> {
        update.validate()?;

        let tourist = self
            .repository
            .tourists
            .update(user_id, |t| {
                if let Some(score) = update.safety_score {
                    t.set_safety_score(score);
                }
                if let Some(phone) = update.phone_number {
                    t.phone_number = Some(phone);
                }
            })
            .await?;

        if update.safety_score.is_some() {
            report_low_score(&tourist);
        }
        Ok(tourist)
    }

    /// Register a trip and copy its details onto the tourist record
    pub async fn create_trip(&self, user_id: &str, data: CreateTrip) -> AppResult<Trip> {
        data.validate()?;
        self.repository.tourists.get(user_id).await?;

        let trip = self.repository.trips.create(user_id, data).await;
        let contacts: Vec<EmergencyContact> = trip.emergency_contacts.clone();

        self.repository
            .tourists
            .update(user_id, |t| {
                t.destination = trip.destination.clone();
                t.trip_start_date = Some(trip.start_date);
                t.trip_end_date = Some(trip.end_date);
                t.transport_mode = trip.transport_mode.clone().unwrap_or_default();
                t.stay_info = trip.stay_info.clone().unwrap_or_default();
                t.health_info = trip.health_info.clone().unwrap_or_default();
                t.emergency_contacts = contacts;
                t.user.profile_complete = true;
            })
            .await?;
        // Registry tourists loaded from fixtures have no login account
        match self.repository.users.set_profile_complete(user_id, true).await {
            Ok(()) | Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        tracing::info!(tourist_id = %user_id, trip_id = %trip.id, "trip registered");
        Ok(trip)
    }

    pub async fn active_trip(&self, user_id: &str) -> AppResult<Trip> {
        self.repository.tourists.get(user_id).await?;
        self.repository
            .trips
            .active_for(user_id)
            .await
            .ok_or_else(|| AppError::NotFound("No active trip found".to_string()))
    }

    /// Record the tourist's position and re-estimate the safety score.
    /// The stored score changes only when the estimate moves by more than
    /// [`RESCORE_THRESHOLD`].
    pub async fn update_location(
        &self,
        user_id: &str,
        data: UpdateLocation,
    ) -> AppResult<UpdateLocationResponse> {
        data.validate()?;

        let estimate = self.scorer.estimate();
        let tourist = self
            .repository
            .tourists
            .update(user_id, |t| {
                t.current_location = Some(Location {
                    lat: data.latitude,
                    lng: data.longitude,
                    address: data.address.clone().unwrap_or_default(),
                });
                if (t.safety_score - estimate).abs() > RESCORE_THRESHOLD {
                    t.set_safety_score(estimate);
                }
            })
            .await?;

        tracing::debug!(
            tourist_id = %user_id,
            estimate,
            stored = tourist.safety_score,
            "location updated"
        );
        report_low_score(&tourist);

        Ok(UpdateLocationResponse {
            message: "Location updated successfully".to_string(),
            ai_safety_score: estimate,
        })
    }

    /// Set the KYC status of a tourist (tourism department)
    pub async fn update_kyc(&self, tourist_id: &str, status: KycStatus) -> AppResult<Tourist> {
        let tourist = self
            .repository
            .tourists
            .update(tourist_id, |t| t.kyc_status = status)
            .await?;
        tracing::info!(tourist_id = %tourist_id, status = %status, "KYC status updated");
        Ok(tourist)
    }
}

fn report_low_score(tourist: &Tourist) {
    if tourist.safety_score < LOW_SCORE_ALERT_THRESHOLD {
        tracing::warn!(
            tourist_id = %tourist.id(),
            name = %tourist.name(),
            safety_score = tourist.safety_score,
            "low safety score"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::NaiveDate;

    async fn seeded() -> TouristsService {
        let repository = Repository::new();
        for tourist in fixtures::tourists() {
            repository.tourists.upsert(tourist).await;
        }
        TouristsService::new(repository)
    }

    #[tokio::test]
    async fn test_update_profile_validates_range() {
        let service = seeded().await;
        let bad = UpdateTouristProfile {
            safety_score: Some(11.0),
            phone_number: None,
        };
        assert!(matches!(
            service.update_profile("tourist-1", bad).await,
            Err(AppError::Validation(_))
        ));

        let good = UpdateTouristProfile {
            safety_score: Some(4.5),
            phone_number: Some("+91-1".into()),
        };
        let tourist = service.update_profile("tourist-1", good).await.unwrap();
        assert_eq!(tourist.safety_score, 4.5);
        assert_eq!(tourist.phone_number.as_deref(), Some("+91-1"));
    }

    #[tokio::test]
    async fn test_location_update_keeps_score_in_range() {
        let service = seeded().await;
        let response = service
            .update_location(
                "tourist-2",
                UpdateLocation {
                    latitude: 9.5,
                    longitude: 76.3,
                    address: Some("Alleppey".into()),
                    accuracy: None,
                },
            )
            .await
            .unwrap();
        assert!((1.0..=10.0).contains(&response.ai_safety_score));

        let tourist = service.get_profile("tourist-2").await.unwrap();
        assert_eq!(tourist.current_location.unwrap().address, "Alleppey");
        assert!((0.0..=10.0).contains(&tourist.safety_score));
    }

    #[tokio::test]
    async fn test_active_trip_missing() {
        let service = seeded().await;
        assert!(matches!(
            service.active_trip("tourist-1").await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.active_trip("nobody").await.is_err());
        assert!(service
            .create_trip(
                "nobody",
                CreateTrip {
                    destination: "Goa".into(),
                    start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
                    transport_mode: None,
                    stay_info: None,
                    health_info: None,
                    emergency_contacts: vec![],
                },
            )
            .await
            .is_err());
    }
}
