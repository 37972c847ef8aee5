//! Health check and demo data endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::SeedReport, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Deployment environment from configuration
    pub environment: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.server.environment.clone(),
    })
}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.server.environment.clone(),
    })
}

/// Load the demo accounts, tourists and alerts
#[utoipa::path(
    post,
    path = "/seed-data",
    tag = "health",
    responses(
        (status = 200, description = "Demo data loaded", body = SeedReport)
    )
)]
pub async fn seed_data(State(state): State<AppState>) -> AppResult<Json<SeedReport>> {
    let report = state.services.seed().await?;
    Ok(Json(report))
}
