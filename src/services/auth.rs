//! Authentication and account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    fixtures,
    models::{
        user::{
            LoginRequest, LoginResponse, PoliceProfile, RoleProfile, SignupRequest, TourismProfile,
            UserAccount, UserClaims, UserProfileResponse,
        },
        KycStatus, Role, Tourist, User,
    },
    repository::{new_id, Repository},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account and its role-specific profile
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        request.validate()?;

        if self.repository.users.email_exists(&request.email).await {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let account = UserAccount {
            id: new_id(request.role.as_str()),
            email: request.email.clone(),
            name: request.name.clone(),
            role: request.role,
            password_hash: self.hash_password(&request.password)?,
            profile_complete: request.role != Role::Tourist,
            is_active: true,
            created_at: Utc::now(),
        };
        let account = self.repository.users.create(account).await?;
        let user = account.to_user();

        match request.role {
            Role::Tourist => {
                let tourist = Tourist::new_profile(user.clone(), generate_identifier("DID"));
                self.repository.tourists.upsert(tourist).await;
            }
            Role::Police => {
                let profile = PoliceProfile {
                    police_id: request
                        .police_id
                        .unwrap_or_else(|| generate_identifier("POL")),
                    station: "Central Station".to_string(),
                    jurisdiction: "City Center".to_string(),
                };
                self.repository
                    .users
                    .set_profile(&user.id, RoleProfile::Police(profile))
                    .await;
            }
            Role::Tourism => {
                let profile = TourismProfile {
                    employee_id: request
                        .employee_id
                        .unwrap_or_else(|| generate_identifier("TOU")),
                    department: "Tourism Board".to_string(),
                    region: "Regional Office".to_string(),
                };
                self.repository
                    .users
                    .set_profile(&user.id, RoleProfile::Tourism(profile))
                    .await;
            }
        }

        tracing::info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    /// Authenticate by email, password and role and return a bearer token
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let account = self
            .repository
            .users
            .get_by_email_and_role(&request.email, request.role)
            .await
            .ok_or_else(|| AppError::Authentication("Incorrect email or password".to_string()))?;

        if !self.verify_password(&account, &request.password)? {
            return Err(AppError::Authentication(
                "Incorrect email or password".to_string(),
            ));
        }

        if !account.is_active {
            return Err(AppError::BadRequest("Inactive user".to_string()));
        }

        let now = Utc::now();
        let claims = UserClaims {
            sub: account.email.clone(),
            user_id: account.id.clone(),
            role: account.role,
            exp: (now + Duration::minutes(self.config.jwt_expiration_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::debug!(user_id = %account.id, "login succeeded");

        Ok(LoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            user: account.to_user(),
        })
    }

    /// Current user record
    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        let account = self.repository.users.get_by_id(user_id).await?;
        Ok(account.to_user())
    }

    /// User with its role-specific profile
    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserProfileResponse> {
        let user = self.get_user(user_id).await?;
        let profile = match user.role {
            Role::Tourist => self
                .repository
                .tourists
                .get(user_id)
                .await
                .ok()
                .map(RoleProfile::Tourist),
            Role::Police | Role::Tourism => self.repository.users.get_profile(user_id).await,
        };
        Ok(UserProfileResponse { user, profile })
    }

    /// Create the demo accounts; existing emails are left untouched
    pub async fn seed_demo_accounts(&self) -> AppResult<usize> {
        let mut created = 0;
        for demo in fixtures::DEMO_ACCOUNTS.iter() {
            if self.repository.users.email_exists(demo.email).await {
                continue;
            }
            let user = self
                .signup(SignupRequest {
                    email: demo.email.to_string(),
                    name: demo.name.to_string(),
                    role: demo.role,
                    password: fixtures::DEMO_PASSWORD.to_string(),
                    aadhaar_number: None,
                    passport_number: None,
                    police_id: None,
                    employee_id: None,
                })
                .await?;

            if user.role == Role::Tourist {
                self.repository
                    .tourists
                    .update(&user.id, |t| t.kyc_status = KycStatus::Verified)
                    .await?;
            }
            created += 1;
        }
        Ok(created)
    }

    fn verify_password(&self, account: &UserAccount, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&account.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

/// `PREFIX-XXXXXXXX` with eight upper-case hex characters
fn generate_identifier(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}", prefix, &uuid[..8])
}
