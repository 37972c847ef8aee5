//! Alerts repository

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{alert::CreateAlert, Alert, AlertStatus},
};

use super::new_id;

#[derive(Clone, Default)]
pub struct AlertsRepository {
    alerts: Arc<RwLock<IndexMap<String, Alert>>>,
}

impl AlertsRepository {
    /// Create a new active alert stamped with the current time
    pub async fn create(&self, data: CreateAlert) -> Alert {
        let alert = Alert {
            id: new_id("alert"),
            tourist_id: data.tourist_id,
            alert_type: data.alert_type,
            message: data.message,
            timestamp: Utc::now(),
            status: AlertStatus::Active,
            priority: data.priority,
            location: data.location,
            assigned_officer_id: None,
            acknowledged_at: None,
            resolved_at: None,
        };
        self.insert(alert.clone()).await;
        alert
    }

    /// Store an alert as-is (used for seeding)
    pub async fn insert(&self, alert: Alert) {
        self.alerts.write().await.insert(alert.id.clone(), alert);
    }

    /// List alerts, newest first, optionally filtered by status
    pub async fn list(&self, status: Option<AlertStatus>, limit: usize) -> Vec<Alert> {
        let alerts = self.alerts.read().await;
        let mut rows: Vec<Alert> = alerts
            .values()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit);
        rows
    }

    pub async fn get(&self, id: &str) -> AppResult<Alert> {
        self.alerts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Alert not found".to_string()))
    }

    /// Apply a fallible change to a stored alert
    pub async fn update<F>(&self, id: &str, f: F) -> AppResult<Alert>
    where
        F: FnOnce(&mut Alert) -> AppResult<()>,
    {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Alert not found".to_string()))?;
        f(alert)?;
        Ok(alert.clone())
    }

    pub async fn count(&self) -> u64 {
        self.alerts.read().await.len() as u64
    }

    pub async fn count_by_status(&self, status: AlertStatus) -> u64 {
        self.alerts
            .read()
            .await
            .values()
            .filter(|a| a.status == status)
            .count() as u64
    }

    /// Alerts resolved on the given (UTC) day
    pub async fn count_resolved_on(&self, day: NaiveDate) -> u64 {
        self.alerts
            .read()
            .await
            .values()
            .filter(|a| a.status == AlertStatus::Resolved)
            .filter(|a| a.resolved_at.map(|t| t.date_naive()) == Some(day))
            .count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_list_newest_first_with_filter() {
        let repo = AlertsRepository::default();
        for alert in fixtures::alerts() {
            repo.insert(alert).await;
        }

        let all = repo.list(None, 50).await;
        assert_eq!(all[0].id, "alert-1");
        assert_eq!(all[1].id, "alert-2");

        let active = repo.list(Some(AlertStatus::Active), 50).await;
        assert_eq!(active.len(), 1);
        assert_eq!(repo.list(None, 1).await.len(), 1);
        assert_eq!(repo.count_by_status(AlertStatus::Acknowledged).await, 1);
    }
}
