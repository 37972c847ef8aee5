//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        user::{LoginRequest, LoginResponse, SignupRequest, UserProfileResponse},
        User,
    },
    AppState,
};

use super::AuthenticatedUser;

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.signup(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email, password and role
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;
    let response = state.services.auth.authenticate(&request).await?;
    Ok(Json(response))
}

/// Get current user information
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.auth.get_user(&claims.user_id).await?;
    Ok(Json(user))
}

/// Get current user with its role-specific profile
#[utoipa::path(
    get,
    path = "/auth/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User and profile", body = UserProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = state.services.auth.get_profile(&claims.user_id).await?;
    Ok(Json(profile))
}
