//! Smart Tourist Safety
//!
//! Role-based safety dashboards for tourists, police and the tourism
//! department. The crate contains the REST API server (`api`, `services`,
//! `repository`) and the dashboard client (`client`) that talks to it and
//! falls back to demo data when it cannot.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use models::user::RolePolicy;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }

    /// Role policy applied by protected handlers
    pub fn role_policy(&self) -> RolePolicy {
        RolePolicy::from_enforce_flag(self.config.auth.enforce_roles)
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .route("/seed-data", post(api::health::seed_data))
        // Authentication
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/profile", get(api::auth::profile))
        // Tourist
        .route(
            "/tourist/profile",
            get(api::tourist::get_profile).put(api::tourist::update_profile),
        )
        .route("/tourist/trip", post(api::tourist::create_trip))
        .route("/tourist/trip/active", get(api::tourist::active_trip))
        .route("/tourist/location", post(api::tourist::update_location))
        .route("/tourist/panic", post(api::tourist::panic))
        .route("/tourist/chatbot", post(api::tourist::chatbot))
        // Police
        .route("/police/alerts", get(api::police::list_alerts))
        .route(
            "/police/alerts/:id",
            get(api::police::get_alert).put(api::police::update_alert),
        )
        .route("/police/alerts/:id/call", post(api::police::call_tourist))
        .route("/police/alerts/:id/assign", post(api::police::assign_officer))
        .route("/police/tourists", get(api::police::list_tourists))
        .route("/police/dashboard/stats", get(api::police::dashboard_stats))
        // Tourism department
        .route("/tourism/tourists", get(api::tourism::list_tourists))
        .route("/tourism/tourists/:id/kyc", put(api::tourism::update_kyc))
        .route("/tourism/statistics", get(api::tourism::statistics))
        .route("/tourism/analytics/influx", get(api::tourism::influx))
        .route("/tourism/analytics/destinations", get(api::tourism::destinations))
        .route("/tourism/analytics/languages", get(api::tourism::languages))
        .route("/tourism/analytics/safety-metrics", get(api::tourism::safety_metrics))
        .route("/tourism/activities/recent", get(api::tourism::recent_activities))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// `*` (or an empty list) allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}
