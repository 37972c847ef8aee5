//! Dashboard client.
//!
//! Talks to the REST API when it is reachable and falls back to offline
//! login and the bundled demo data when it is not.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod session;
pub mod storage;
pub mod transport;

pub use api::DashboardApi;
pub use auth::{AuthContext, AuthProvider, OfflineAuthProvider, RemoteAuthProvider, SignupForm};
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, RouteGuard};
pub use session::SessionStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transport::ApiTransport;
