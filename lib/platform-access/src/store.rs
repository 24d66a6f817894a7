//! User store contract and an in-memory implementation.

use crate::error::UserStoreError;
use crate::user::User;
use async_trait::async_trait;
use rootcause::prelude::Report;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Lookup-or-create access to application users, keyed by email.
///
/// Implementations must be idempotent by email: repeated and concurrent
/// calls for the same email return the same user and create at most one.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the user for `email`, creating a regular user if none exists.
    async fn resolve_or_create(&self, email: &str) -> Result<User, Report<UserStoreError>>;
}

/// A user store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn resolve_or_create(&self, email: &str) -> Result<User, Report<UserStoreError>> {
        let mut users = self.users.lock().await;
        let user = users
            .entry(email.to_string())
            .or_insert_with(|| User::new(email.to_string()));
        Ok(user.clone())
    }
}
