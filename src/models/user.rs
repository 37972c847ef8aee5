//! User model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

use super::enums::{KycStatus, Role};

/// Authenticated user identity, as held by the dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub profile_complete: bool,
}

/// Server-side account record. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Argon2 PHC string
    pub password_hash: String,
    pub profile_complete: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            profile_complete: self.profile_complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Tourist record: a user plus KYC, trip and safety details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tourist {
    #[serde(flatten)]
    pub user: User,
    pub kyc_status: KycStatus,
    pub digital_id: String,
    pub destination: String,
    pub transport_mode: String,
    pub stay_info: String,
    pub health_info: String,
    pub emergency_contacts: Vec<EmergencyContact>,
    /// Safety score in [0, 10]
    pub safety_score: f64,
    pub current_location: Option<Location>,
    pub trip_start_date: Option<NaiveDate>,
    pub trip_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

pub const MIN_SAFETY_SCORE: f64 = 0.0;
pub const MAX_SAFETY_SCORE: f64 = 10.0;

/// Clamp a score into the documented [0, 10] range. NaN maps to 0.
pub fn clamp_safety_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SAFETY_SCORE;
    }
    score.clamp(MIN_SAFETY_SCORE, MAX_SAFETY_SCORE)
}

impl Tourist {
    /// Fresh tourist profile created at signup
    pub fn new_profile(user: User, digital_id: String) -> Self {
        Self {
            user,
            kyc_status: KycStatus::Pending,
            digital_id,
            destination: String::new(),
            transport_mode: String::new(),
            stay_info: String::new(),
            health_info: String::new(),
            emergency_contacts: Vec::new(),
            safety_score: 8.0,
            current_location: None,
            trip_start_date: None,
            trip_end_date: None,
            phone_number: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn set_safety_score(&mut self, score: f64) {
        self.safety_score = clamp_safety_score(score);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoliceProfile {
    pub police_id: String,
    pub station: String,
    pub jurisdiction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourismProfile {
    pub employee_id: String,
    pub department: String,
    pub region: String,
}

/// Role-specific profile attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RoleProfile {
    Tourist(Tourist),
    Police(PoliceProfile),
    Tourism(TourismProfile),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub user: User,
    pub profile: Option<RoleProfile>,
}

/// Signup request. Role-specific identifiers are optional.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: Role,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Tourist self-service profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTouristProfile {
    #[validate(range(min = 0.0, max = 10.0, message = "Safety score must be between 0 and 10"))]
    pub safety_score: Option<f64>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateKyc {
    pub status: KycStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateKycResponse {
    pub message: String,
    pub status: KycStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub address: Option<String>,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLocationResponse {
    pub message: String,
    pub ai_safety_score: f64,
}

/// How role restrictions on protected routes are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePolicy {
    /// Reject users whose role is not in the allowed set
    Enforce,
    /// Let any authenticated user through
    Permissive,
}

impl RolePolicy {
    pub fn from_enforce_flag(enforce: bool) -> Self {
        if enforce {
            RolePolicy::Enforce
        } else {
            RolePolicy::Permissive
        }
    }

    pub fn permits(&self, role: Role, allowed: &[Role]) -> bool {
        match self {
            RolePolicy::Enforce => allowed.is_empty() || allowed.contains(&role),
            RolePolicy::Permissive => true,
        }
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// User email
    pub sub: String,
    pub user_id: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require one of the given roles under the configured policy
    pub fn require_role(&self, allowed: &[Role], policy: RolePolicy) -> Result<(), AppError> {
        if policy.permits(self.role, allowed) {
            if !RolePolicy::Enforce.permits(self.role, allowed) {
                tracing::debug!(
                    user_id = %self.user_id,
                    role = %self.role,
                    "role restriction bypassed by permissive policy"
                );
            }
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role '{}' may not access this resource",
                self.role
            )))
        }
    }
}
