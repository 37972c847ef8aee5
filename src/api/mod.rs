//! API handlers for the tourist safety REST endpoints

pub mod auth;
pub mod health;
pub mod openapi;
pub mod police;
pub mod tourism;
pub mod tourist;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    if e.is_missing() {
                        AppError::Authentication("Missing authorization header".to_string())
                    } else {
                        AppError::Authentication("Invalid authorization header format".to_string())
                    }
                })?;

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)
            .map_err(|_| AppError::Authentication("Could not validate credentials".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
