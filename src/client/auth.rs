//! Dashboard authentication.
//!
//! `AuthContext` is the session object handed to every view. It asks the
//! remote provider first and, when that fails for any reason, an optional
//! offline provider that accepts a single configured password. The offline
//! provider performs no verification at all and exists for demos without a
//! running API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    config::ClientConfig,
    models::{
        user::{LoginRequest, LoginResponse, SignupRequest},
        Role, User,
    },
};

use super::{
    error::{ClientError, ClientResult},
    session::SessionStore,
    storage::Storage,
    transport::ApiTransport,
};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password must be at least 8 characters long";

const MIN_PASSWORD_LENGTH: usize = 8;

/// Result of a successful login or signup
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    /// Bearer token; absent for offline sessions
    pub access_token: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthSession>;
    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthSession>;
}

/// Provider backed by the REST API
pub struct RemoteAuthProvider {
    transport: ApiTransport,
}

impl RemoteAuthProvider {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthSession> {
        let response: LoginResponse = self
            .transport
            .post("/auth/login", Some(request), None)
            .await?;
        Ok(AuthSession {
            user: response.user,
            access_token: Some(response.access_token),
        })
    }

    /// Register, then log in with the same credentials
    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthSession> {
        let _created: User = self
            .transport
            .post("/auth/signup", Some(request), None)
            .await?;
        self.login(&LoginRequest {
            email: request.email.clone(),
            password: request.password.clone(),
            role: request.role,
        })
        .await
    }
}

/// Demo provider used when the API cannot be reached
pub struct OfflineAuthProvider {
    password: String,
}

impl OfflineAuthProvider {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    fn session_id(role: Role) -> String {
        format!("{}-{}", role, Utc::now().timestamp_millis())
    }
}

#[async_trait]
impl AuthProvider for OfflineAuthProvider {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthSession> {
        if request.password != self.password {
            return Err(ClientError::InvalidCredentials);
        }
        let name = request
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(AuthSession {
            user: User {
                id: Self::session_id(request.role),
                email: request.email.clone(),
                name,
                role: request.role,
                profile_complete: request.role != Role::Tourist,
            },
            access_token: None,
        })
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthSession> {
        Ok(AuthSession {
            user: User {
                id: Self::session_id(request.role),
                email: request.email.clone(),
                name: request.name.clone(),
                role: request.role,
                profile_complete: false,
            },
            access_token: None,
        })
    }
}

/// Fields of the signup form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub aadhaar_number: Option<String>,
    pub passport_number: Option<String>,
    pub police_id: Option<String>,
    pub employee_id: Option<String>,
}

impl SignupForm {
    pub fn new(name: &str, email: &str, password: &str, confirm_password: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
            role,
            aadhaar_number: None,
            passport_number: None,
            police_id: None,
            employee_id: None,
        }
    }

    /// Check the form and build the signup request
    pub fn validate(&self) -> ClientResult<SignupRequest> {
        if self.password != self.confirm_password {
            return Err(ClientError::Validation(PASSWORD_MISMATCH_MESSAGE.to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ClientError::Validation(PASSWORD_TOO_SHORT_MESSAGE.to_string()));
        }
        Ok(SignupRequest {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            password: self.password.clone(),
            aadhaar_number: self.aadhaar_number.clone(),
            passport_number: self.passport_number.clone(),
            police_id: self.police_id.clone(),
            employee_id: self.employee_id.clone(),
        })
    }
}

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    loading: bool,
}

/// Injected session object shared by the dashboard views
pub struct AuthContext {
    remote: Arc<dyn AuthProvider>,
    fallback: Option<Arc<dyn AuthProvider>>,
    session: SessionStore,
    fallback_password: Option<String>,
    state: RwLock<AuthState>,
}

impl AuthContext {
    /// Context that reports `loading` until [`AuthContext::restore`] runs
    pub fn new(
        remote: Arc<dyn AuthProvider>,
        fallback: Option<Arc<dyn AuthProvider>>,
        session: SessionStore,
    ) -> Self {
        Self {
            remote,
            fallback,
            session,
            fallback_password: None,
            state: RwLock::new(AuthState {
                user: None,
                loading: true,
            }),
        }
    }

    pub fn from_config(config: &ClientConfig, storage: Arc<dyn Storage>) -> ClientResult<Self> {
        let remote = Arc::new(RemoteAuthProvider::new(ApiTransport::from_config(config)?));
        let offline = &config.offline_fallback;
        let fallback = offline.enabled.then(|| {
            Arc::new(OfflineAuthProvider::new(offline.password.clone())) as Arc<dyn AuthProvider>
        });

        let mut context = Self::new(remote, fallback, SessionStore::new(storage));
        if offline.enabled {
            context.fallback_password = Some(offline.password.clone());
        }
        Ok(context)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Reload the persisted user on start-up
    pub async fn restore(&self) -> Option<User> {
        let user = self.session.load_user();
        let mut state = self.state.write().await;
        state.user = user.clone();
        state.loading = false;
        user
    }

    /// Log in remotely, falling back to the offline provider on any failure.
    /// Returns the signed-in user, or `None` when both attempts fail.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Option<User> {
        self.state.write().await.loading = true;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        let session = match self.remote.login(&request).await {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, %role, "remote login failed");
                self.try_fallback_login(&request).await
            }
        };

        let user = session.map(|s| self.persist(s));
        let mut state = self.state.write().await;
        if user.is_some() {
            state.user = user.clone();
        }
        state.loading = false;
        user
    }

    /// Login as submitted from the login form, with the form's error text
    pub async fn submit_login(&self, email: &str, password: &str, role: Role) -> Result<User, String> {
        match self.login(email, password, role).await {
            Some(user) => Ok(user),
            None => Err(match &self.fallback_password {
                Some(password) => format!("Invalid credentials. Use password: {}", password),
                None => LOGIN_FAILED_MESSAGE.to_string(),
            }),
        }
    }

    async fn try_fallback_login(&self, request: &LoginRequest) -> Option<AuthSession> {
        let fallback = self.fallback.as_ref()?;
        match fallback.login(request).await {
            Ok(session) => {
                tracing::info!(role = %request.role, "signed in with offline fallback");
                Some(session)
            }
            Err(e) => {
                tracing::debug!(error = %e, "offline login rejected");
                None
            }
        }
    }

    /// Register and sign in. Form errors are returned as
    /// [`ClientError::Validation`]; remote failures fall back to an offline
    /// account when the fallback is enabled.
    pub async fn signup(&self, form: &SignupForm) -> ClientResult<User> {
        let request = form.validate()?;
        self.state.write().await.loading = true;

        let result = match self.remote.signup(&request).await {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(error = %e, role = %request.role, "remote signup failed");
                match &self.fallback {
                    Some(fallback) => fallback.signup(&request).await,
                    None => Err(ClientError::Validation(SIGNUP_FAILED_MESSAGE.to_string())),
                }
            }
        };

        let mut state = self.state.write().await;
        state.loading = false;
        let user = self.persist(result?);
        state.user = Some(user.clone());
        Ok(user)
    }

    /// Forget the user and remove both storage entries
    pub async fn logout(&self) {
        self.state.write().await.user = None;
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "failed to clear stored session");
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    /// Store the session; storage failures leave an in-memory session
    fn persist(&self, session: AuthSession) -> User {
        if let Err(e) = self.session.save_user(&session.user) {
            tracing::error!(error = %e, "failed to persist user");
        }
        let token_result = match &session.access_token {
            Some(token) => self.session.save_access_token(token),
            None => self.session.clear_access_token(),
        };
        if let Err(e) = token_result {
            tracing::error!(error = %e, "failed to persist access token");
        }
        session.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        session::{ACCESS_TOKEN_KEY, USER_KEY},
        storage::MemoryStorage,
    };

    fn offline_only(storage: Arc<MemoryStorage>) -> AuthContext {
        let mut remote = MockAuthProvider::new();
        remote.expect_login().returning(|_| {
            Err(ClientError::Status {
                status: 503,
                message: "unavailable".into(),
            })
        });
        remote.expect_signup().returning(|_| {
            Err(ClientError::Status {
                status: 503,
                message: "unavailable".into(),
            })
        });
        AuthContext::new(
            Arc::new(remote),
            Some(Arc::new(OfflineAuthProvider::new("password123"))),
            SessionStore::new(storage),
        )
    }

    #[tokio::test]
    async fn test_fallback_password_yields_requested_role() {
        for role in [Role::Tourist, Role::Police, Role::Tourism] {
            let context = offline_only(Arc::new(MemoryStorage::new()));
            let user = context
                .login("asha.k@example.com", "password123", role)
                .await
                .unwrap();
            assert_eq!(user.role, role);
            assert_eq!(user.name, "asha.k");
            assert!(user.id.starts_with(&format!("{}-", role)));
            assert_eq!(user.profile_complete, role != Role::Tourist);
            assert!(context.is_authenticated().await);
        }
    }

    #[tokio::test]
    async fn test_wrong_password_with_failing_backend() {
        let storage = Arc::new(MemoryStorage::new());
        let context = offline_only(storage.clone());
        assert!(context.login("a@b.com", "hunter2", Role::Police).await.is_none());
        assert!(!context.is_authenticated().await);
        assert!(!context.is_loading().await);
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);

        let message = context.submit_login("a@b.com", "nope", Role::Police).await;
        assert!(message.is_err());
    }

    #[tokio::test]
    async fn test_remote_success_persists_token() {
        let storage = Arc::new(MemoryStorage::new());
        let mut remote = MockAuthProvider::new();
        remote.expect_login().times(1).returning(|request| {
            Ok(AuthSession {
                user: User {
                    id: "u-1".into(),
                    email: request.email.clone(),
                    name: "Officer".into(),
                    role: request.role,
                    profile_complete: true,
                },
                access_token: Some("jwt".into()),
            })
        });
        let mut fallback = MockAuthProvider::new();
        fallback.expect_login().never();

        let context = AuthContext::new(
            Arc::new(remote),
            Some(Arc::new(fallback)),
            SessionStore::new(storage.clone()),
        );
        let user = context.login("o@b.com", "whatever", Role::Police).await.unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("jwt"));

        context.logout().await;
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(context.user().await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_fallback_reports_generic_message() {
        let mut remote = MockAuthProvider::new();
        remote
            .expect_login()
            .returning(|_| Err(ClientError::InvalidCredentials));
        let context = AuthContext::new(
            Arc::new(remote),
            None,
            SessionStore::new(Arc::new(MemoryStorage::new())),
        );
        let err = context
            .submit_login("a@b.com", "password123", Role::Tourist)
            .await
            .unwrap_err();
        assert_eq!(err, LOGIN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_signup_fallback_and_validation() {
        let context = offline_only(Arc::new(MemoryStorage::new()));

        let mismatch = SignupForm::new("Asha", "asha@b.com", "longenough", "different", Role::Tourist);
        match context.signup(&mismatch).await {
            Err(ClientError::Validation(msg)) => assert_eq!(msg, PASSWORD_MISMATCH_MESSAGE),
            other => panic!("unexpected {other:?}"),
        }

        let short = SignupForm::new("Asha", "asha@b.com", "short", "short", Role::Tourist);
        match context.signup(&short).await {
            Err(ClientError::Validation(msg)) => assert_eq!(msg, PASSWORD_TOO_SHORT_MESSAGE),
            other => panic!("unexpected {other:?}"),
        }

        let form = SignupForm::new("Asha", "asha@b.com", "longenough", "longenough", Role::Police);
        let user = context.signup(&form).await.unwrap();
        assert_eq!(user.name, "Asha");
        assert!(!user.profile_complete);
        assert_eq!(context.user().await, Some(user));
    }

    #[tokio::test]
    async fn test_restore_reads_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let first = offline_only(storage.clone());
        assert!(first.is_loading().await);
        first.login("t@b.com", "password123", Role::Tourist).await.unwrap();

        let second = offline_only(storage);
        let restored = second.restore().await.unwrap();
        assert_eq!(restored.email, "t@b.com");
        assert!(!second.is_loading().await);
    }
}
