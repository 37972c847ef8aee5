//! Persisted dashboard session

use std::sync::Arc;

use crate::models::User;

use super::{
    error::{ClientError, ClientResult},
    storage::Storage,
};

pub const USER_KEY: &str = "user";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// The signed-in user and bearer token kept in local storage.
/// Entries never expire and are never refreshed.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stored user, if any. Unreadable entries count as signed out.
    pub fn load_user(&self) -> Option<User> {
        let raw = match self.storage.get_item(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed stored user");
                None
            }
        }
    }

    pub fn save_user(&self, user: &User) -> ClientResult<()> {
        let json = serde_json::to_string(user)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set_item(USER_KEY, &json)
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get_item(ACCESS_TOKEN_KEY).ok().flatten()
    }

    pub fn save_access_token(&self, token: &str) -> ClientResult<()> {
        self.storage.set_item(ACCESS_TOKEN_KEY, token)
    }

    pub fn clear_access_token(&self) -> ClientResult<()> {
        self.storage.remove_item(ACCESS_TOKEN_KEY)
    }

    /// Remove both the user and the access token
    pub fn clear(&self) -> ClientResult<()> {
        self.storage.remove_item(USER_KEY)?;
        self.storage.remove_item(ACCESS_TOKEN_KEY)
    }
}
