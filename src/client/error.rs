//! Error type of the dashboard client

use thiserror::Error;

/// Why a client operation failed. Callers in the dashboard mostly degrade to
/// demo data; the variants keep that decision explicit.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// True when the remote API answered 401 or 403
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401 | 403, .. })
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
