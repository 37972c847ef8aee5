//! Tourist dashboard endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        alert::PanicResponse,
        trip::CreateTrip,
        user::{UpdateLocation, UpdateLocationResponse, UpdateTouristProfile},
        Role, Tourist, Trip,
    },
    services::chatbot::{ChatbotReply, ChatbotRequest},
    AppState,
};

use super::AuthenticatedUser;

const TOURIST: &[Role] = &[Role::Tourist];

/// Get the caller's tourist profile
#[utoipa::path(
    get,
    path = "/tourist/profile",
    tag = "tourist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tourist profile", body = Tourist),
        (status = 403, description = "Not a tourist account"),
        (status = 404, description = "Tourist profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Tourist>> {
    claims.require_role(TOURIST, state.role_policy())?;

    let tourist = state.services.tourists.get_profile(&claims.user_id).await?;
    Ok(Json(tourist))
}

/// Update the caller's safety score or phone number
#[utoipa::path(
    put,
    path = "/tourist/profile",
    tag = "tourist",
    security(("bearer_auth" = [])),
    request_body = UpdateTouristProfile,
    responses(
        (status = 200, description = "Profile updated", body = Tourist),
        (status = 400, description = "Invalid value")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(update): Json<UpdateTouristProfile>,
) -> AppResult<Json<Tourist>> {
    claims.require_role(TOURIST, state.role_policy())?;

    let tourist = state
        .services
        .tourists
        .update_profile(&claims.user_id, update)
        .await?;
    Ok(Json(tourist))
}

/// Register a trip
#[utoipa::path(
    post,
    path = "/tourist/trip",
    tag = "tourist",
    security(("bearer_auth" = [])),
    request_body = CreateTrip,
    responses(
        (status = 201, description = "Trip registered", body = Trip),
        (status = 400, description = "Invalid trip")
    )
)]
pub async fn create_trip(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(trip): Json<CreateTrip>,
) -> AppResult<(StatusCode, Json<Trip>)> {
    claims.require_role(TOURIST, state.role_policy())?;

    let trip = state.services.tourists.create_trip(&claims.user_id, trip).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// Current active trip
#[utoipa::path(
    get,
    path = "/tourist/trip/active",
    tag = "tourist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active trip", body = Trip),
        (status = 404, description = "No active trip found")
    )
)]
pub async fn active_trip(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Trip>> {
    claims.require_role(TOURIST, state.role_policy())?;

    let trip = state.services.tourists.active_trip(&claims.user_id).await?;
    Ok(Json(trip))
}

/// Report the caller's position
#[utoipa::path(
    post,
    path = "/tourist/location",
    tag = "tourist",
    security(("bearer_auth" = [])),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location stored", body = UpdateLocationResponse)
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(location): Json<UpdateLocation>,
) -> AppResult<Json<UpdateLocationResponse>> {
    claims.require_role(TOURIST, state.role_policy())?;

    let response = state
        .services
        .tourists
        .update_location(&claims.user_id, location)
        .await?;
    Ok(Json(response))
}

/// Press the panic button
#[utoipa::path(
    post,
    path = "/tourist/panic",
    tag = "tourist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Panic alert raised", body = PanicResponse),
        (status = 404, description = "Tourist profile not found")
    )
)]
pub async fn panic(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<PanicResponse>> {
    claims.require_role(TOURIST, state.role_policy())?;

    let response = state.services.alerts.trigger_panic(&claims).await?;
    Ok(Json(response))
}

/// Ask the safety assistant
#[utoipa::path(
    post,
    path = "/tourist/chatbot",
    tag = "tourist",
    security(("bearer_auth" = [])),
    request_body = ChatbotRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatbotReply)
    )
)]
pub async fn chatbot(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ChatbotRequest>,
) -> AppResult<Json<ChatbotReply>> {
    claims.require_role(TOURIST, state.role_policy())?;
    request.validate()?;

    Ok(Json(state.services.chatbot.reply(&request.message)))
}
