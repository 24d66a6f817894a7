//! Postgres-backed user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use xyz_chat_core::UserId;
use xyz_chat_platform_access::{User, UserStore, UserStoreError, UserType};

/// Row type for user queries.
#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    user_type: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, UserStoreError> {
        let id = UserId::from_str(&self.id).map_err(|e| UserStoreError::InvalidRecord {
            details: format!("invalid user id '{}': {}", self.id, e),
        })?;
        let user_type =
            UserType::from_str(&self.user_type).map_err(|e| UserStoreError::InvalidRecord {
                details: e,
            })?;
        Ok(User::with_all_fields(
            id,
            self.email,
            user_type,
            self.created_at,
        ))
    }
}

/// Repository for user operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Inserts the user or, if the email exists, returns the existing row.
    ///
    /// The no-op update makes `RETURNING` yield the existing row, so
    /// concurrent first sign-ins for one email converge on one user.
    async fn resolve_or_create(&self, email: &str) -> Result<User, Report<UserStoreError>> {
        let candidate = User::new(email.to_string());

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, user_type, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email, user_type, created_at
            "#,
        )
        .bind(candidate.id().to_string())
        .bind(candidate.email())
        .bind(candidate.user_type().as_str())
        .bind(candidate.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to resolve user");
            UserStoreError::Unavailable {
                details: e.to_string(),
            }
        })?;

        Ok(row.try_into_user()?)
    }
}
