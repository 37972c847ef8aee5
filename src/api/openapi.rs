//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, police, tourism, tourist};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tourist Safety API",
        version = "1.0.0",
        description = "Role-based REST API behind the tourist, police and tourism dashboards",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        health::seed_data,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        auth::profile,
        // Tourist
        tourist::get_profile,
        tourist::update_profile,
        tourist::create_trip,
        tourist::active_trip,
        tourist::update_location,
        tourist::panic,
        tourist::chatbot,
        // Police
        police::list_alerts,
        police::get_alert,
        police::update_alert,
        police::list_tourists,
        police::dashboard_stats,
        police::call_tourist,
        police::assign_officer,
        // Tourism
        tourism::list_tourists,
        tourism::statistics,
        tourism::influx,
        tourism::destinations,
        tourism::languages,
        tourism::safety_metrics,
        tourism::recent_activities,
        tourism::update_kyc,
    ),
    components(
        schemas(
            // Users
            crate::models::User,
            crate::models::Role,
            crate::models::user::SignupRequest,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserProfileResponse,
            crate::models::user::RoleProfile,
            crate::models::user::PoliceProfile,
            crate::models::user::TourismProfile,
            // Tourists
            crate::models::Tourist,
            crate::models::KycStatus,
            crate::models::Location,
            crate::models::EmergencyContact,
            crate::models::user::UpdateTouristProfile,
            crate::models::user::UpdateLocation,
            crate::models::user::UpdateLocationResponse,
            crate::models::user::UpdateKyc,
            crate::models::user::UpdateKycResponse,
            // Trips
            crate::models::Trip,
            crate::models::TripStatus,
            crate::models::trip::CreateTrip,
            crate::models::trip::CreateEmergencyContact,
            // Alerts
            crate::models::Alert,
            crate::models::AlertType,
            crate::models::AlertStatus,
            crate::models::AlertPriority,
            crate::models::alert::UpdateAlert,
            crate::models::alert::PanicResponse,
            crate::models::alert::CallResponse,
            crate::models::alert::AssignResponse,
            // Statistics
            crate::models::TripStatistic,
            crate::models::statistics::DestinationCount,
            crate::models::statistics::PoliceDashboardStats,
            crate::models::statistics::InfluxSeries,
            crate::models::statistics::InfluxPoint,
            crate::models::statistics::TopDestination,
            crate::models::statistics::LanguageShare,
            crate::models::statistics::SafetyMetrics,
            crate::models::statistics::RecentActivity,
            crate::models::statistics::ActivityType,
            // Chatbot
            crate::services::chatbot::ChatbotRequest,
            crate::services::chatbot::ChatbotReply,
            // Health
            health::HealthResponse,
            crate::services::SeedReport,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "tourist", description = "Tourist dashboard"),
        (name = "police", description = "Police dashboard"),
        (name = "tourism", description = "Tourism department dashboard")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
