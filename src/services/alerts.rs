//! Alert management service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    fixtures,
    models::{
        alert::{AlertQuery, AssignResponse, CallResponse, CreateAlert, PanicResponse, UpdateAlert},
        user::UserClaims,
        Alert, AlertPriority, AlertStatus, AlertType,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AlertsService {
    repository: Repository,
}

impl AlertsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Alerts for the police dashboard, newest first
    pub async fn list(&self, query: &AlertQuery) -> AppResult<Vec<Alert>> {
        query.validate()?;
        Ok(self.repository.alerts.list(query.status, query.limit()).await)
    }

    pub async fn get(&self, id: &str) -> AppResult<Alert> {
        self.repository.alerts.get(id).await
    }

    /// Apply a status change and/or officer assignment.
    /// Status changes must move forward through the lifecycle.
    pub async fn update(&self, id: &str, update: UpdateAlert) -> AppResult<Alert> {
        let alert = self
            .repository
            .alerts
            .update(id, |alert| {
                if let Some(next) = update.status {
                    apply_status(alert, next)?;
                }
                if let Some(officer) = update.assigned_officer_id {
                    alert.assigned_officer_id = Some(officer);
                }
                Ok(())
            })
            .await?;

        tracing::info!(alert_id = %alert.id, status = %alert.status, "alert updated");
        Ok(alert)
    }

    /// Raise a critical panic alert for the calling tourist.
    /// The alert is pinned to the fixed mock location, not the last reported position.
    pub async fn trigger_panic(&self, claims: &UserClaims) -> AppResult<PanicResponse> {
        let tourist = self.repository.tourists.get(&claims.user_id).await?;
        let location = fixtures::panic_location();

        let alert = self
            .repository
            .alerts
            .create(CreateAlert {
                tourist_id: tourist.id().to_string(),
                alert_type: AlertType::Panic,
                priority: AlertPriority::Critical,
                message: format!("Panic button activated by {}", tourist.name()),
                location,
            })
            .await;

        tracing::warn!(
            alert_id = %alert.id,
            tourist_id = %tourist.id(),
            digital_id = %tourist.digital_id,
            address = %alert.location.address,
            "panic alert raised"
        );

        Ok(PanicResponse {
            message: "Panic alert sent successfully".to_string(),
            alert_id: alert.id,
        })
    }

    /// Placeholder call initiation; no telephony is attached
    pub async fn initiate_call(&self, id: &str, officer: &UserClaims) -> AppResult<CallResponse> {
        let alert = self.repository.alerts.get(id).await?;
        Ok(CallResponse {
            message: format!("Call initiated to tourist for alert {}", alert.id),
            call_id: format!("CALL-{}-{}", alert.id, officer.user_id),
            status: "connecting".to_string(),
        })
    }

    /// Assign the calling officer and acknowledge the alert
    pub async fn assign_officer(&self, id: &str, officer: &UserClaims) -> AppResult<AssignResponse> {
        let alert = self
            .update(
                id,
                UpdateAlert {
                    status: Some(AlertStatus::Acknowledged),
                    assigned_officer_id: Some(officer.user_id.clone()),
                },
            )
            .await?;
        Ok(AssignResponse {
            message: format!("Officer {} assigned to alert {}", officer.sub, alert.id),
            alert,
        })
    }
}

fn apply_status(alert: &mut Alert, next: AlertStatus) -> AppResult<()> {
    if !alert.status.can_transition_to(next) {
        return Err(AppError::BusinessRule(format!(
            "Alert cannot move from {} to {}",
            alert.status, next
        )));
    }
    if next == alert.status {
        return Ok(());
    }

    let now = Utc::now();
    match next {
        AlertStatus::Acknowledged => alert.acknowledged_at = Some(now),
        AlertStatus::Resolved => {
            alert.acknowledged_at.get_or_insert(now);
            alert.resolved_at = Some(now);
        }
        AlertStatus::Active => {}
    }
    alert.status = next;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    async fn seeded() -> AlertsService {
        let repository = Repository::new();
        for alert in fixtures::alerts() {
            repository.alerts.insert(alert).await;
        }
        for tourist in fixtures::tourists() {
            repository.tourists.upsert(tourist).await;
        }
        AlertsService::new(repository)
    }

    fn claims(user_id: &str, role: Role) -> UserClaims {
        UserClaims {
            sub: format!("{user_id}@example.com"),
            user_id: user_id.into(),
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn test_forward_transitions_stamp_times() {
        let service = seeded().await;
        let acked = service
            .update(
                "alert-1",
                UpdateAlert {
                    status: Some(AlertStatus::Acknowledged),
                    assigned_officer_id: None,
                },
            )
            .await
            .unwrap();
        assert!(acked.acknowledged_at.is_some());

        let resolved = service
            .update(
                "alert-1",
                UpdateAlert {
                    status: Some(AlertStatus::Resolved),
                    assigned_officer_id: None,
                },
            )
            .await
            .unwrap();
        assert!(resolved.resolved_at.is_some());
    }

    #[tokio::test]
    async fn test_backward_transition_rejected() {
        let service = seeded().await;
        let err = service
            .update(
                "alert-2",
                UpdateAlert {
                    status: Some(AlertStatus::Active),
                    assigned_officer_id: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        assert_eq!(
            service.get("alert-2").await.unwrap().status,
            AlertStatus::Acknowledged
        );
    }

    #[tokio::test]
    async fn test_panic_creates_critical_alert() {
        let service = seeded().await;
        let response = service
            .trigger_panic(&claims("tourist-1", Role::Tourist))
            .await
            .unwrap();
        let alert = service.get(&response.alert_id).await.unwrap();
        assert_eq!(alert.alert_type, AlertType::Panic);
        assert_eq!(alert.priority, AlertPriority::Critical);
        assert_eq!(alert.status, AlertStatus::Active);
        // tourist-1 has a current location, which the alert ignores
        assert_eq!(alert.location, fixtures::panic_location());
        assert_eq!(alert.location.address, "India Gate, New Delhi");

        let newest = service.list(&AlertQuery::default()).await.unwrap();
        assert_eq!(newest[0].id, response.alert_id);
    }

    #[tokio::test]
    async fn test_assign_officer_acknowledges() {
        let service = seeded().await;
        let officer = claims("police-7", Role::Police);
        let response = service.assign_officer("alert-1", &officer).await.unwrap();
        assert_eq!(response.alert.status, AlertStatus::Acknowledged);
        assert_eq!(response.alert.assigned_officer_id.as_deref(), Some("police-7"));

        let call = service.initiate_call("alert-1", &officer).await.unwrap();
        assert_eq!(call.call_id, "CALL-alert-1-police-7");
        assert!(service.initiate_call("missing", &officer).await.is_err());
    }
}
