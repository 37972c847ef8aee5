//! Users repository

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{RoleProfile, UserAccount},
        Role,
    },
};

#[derive(Clone, Default)]
pub struct UsersRepository {
    accounts: Arc<RwLock<IndexMap<String, UserAccount>>>,
    profiles: Arc<RwLock<HashMap<String, RoleProfile>>>,
}

impl UsersRepository {
    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<UserAccount> {
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (case-insensitive) and role
    pub async fn get_by_email_and_role(&self, email: &str, role: Role) -> Option<UserAccount> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.role == role && a.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> bool {
        self.accounts
            .read()
            .await
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// Insert a new account, rejecting duplicate emails
    pub async fn create(&self, account: UserAccount) -> AppResult<UserAccount> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    pub async fn set_profile_complete(&self, id: &str, complete: bool) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        account.profile_complete = complete;
        Ok(())
    }

    /// Police and tourism profiles; tourist profiles live in the tourists repository
    pub async fn set_profile(&self, user_id: &str, profile: RoleProfile) {
        self.profiles
            .write()
            .await
            .insert(user_id.to_string(), profile);
    }

    pub async fn get_profile(&self, user_id: &str) -> Option<RoleProfile> {
        self.profiles.read().await.get(user_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(id: &str, email: &str, role: Role) -> UserAccount {
        UserAccount {
            id: id.into(),
            email: email.into(),
            name: "Test".into(),
            role,
            password_hash: String::new(),
            profile_complete: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = UsersRepository::default();
        repo.create(account("u1", "a@b.com", Role::Police)).await.unwrap();
        let err = repo
            .create(account("u2", "A@B.com", Role::Tourist))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_requires_matching_role() {
        let repo = UsersRepository::default();
        repo.create(account("u1", "a@b.com", Role::Police)).await.unwrap();
        assert!(repo.get_by_email_and_role("a@b.com", Role::Police).await.is_some());
        assert!(repo.get_by_email_and_role("a@b.com", Role::Tourism).await.is_none());
    }
}
