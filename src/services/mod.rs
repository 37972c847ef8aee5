//! Business logic services

pub mod alerts;
pub mod auth;
pub mod chatbot;
pub mod safety;
pub mod stats;
pub mod tourists;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::AuthConfig, error::AppResult, fixtures, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub tourists: tourists::TouristsService,
    pub alerts: alerts::AlertsService,
    pub stats: stats::StatsService,
    pub chatbot: chatbot::Chatbot,
    repository: Repository,
}

/// Outcome of loading the demo data set
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub message: String,
    pub accounts_created: usize,
    pub tourists: usize,
    pub alerts: usize,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            tourists: tourists::TouristsService::new(repository.clone()),
            alerts: alerts::AlertsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            chatbot: chatbot::Chatbot::new(),
            repository,
        }
    }

    /// Load the demo accounts, registry tourists and alerts.
    /// Fixture records are upserted, so seeding again restores them.
    pub async fn seed(&self) -> AppResult<SeedReport> {
        let accounts_created = self.auth.seed_demo_accounts().await?;

        let tourists = fixtures::tourists();
        let alerts = fixtures::alerts();
        let report = SeedReport {
            message: "Sample data created successfully".to_string(),
            accounts_created,
            tourists: tourists.len(),
            alerts: alerts.len(),
        };

        for tourist in tourists {
            self.repository.tourists.upsert(tourist).await;
        }
        for alert in alerts {
            self.repository.alerts.insert(alert).await;
        }

        tracing::info!(
            accounts = report.accounts_created,
            tourists = report.tourists,
            alerts = report.alerts,
            "demo data loaded"
        );
        Ok(report)
    }
}
