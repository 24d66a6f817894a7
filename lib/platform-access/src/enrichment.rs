//! Token enrichment: stamping the application user onto an approved sign-in.

use crate::error::AuthenticationError;
use crate::gate::ApprovedSignIn;
use crate::store::UserStore;
use crate::token::SessionToken;
use chrono::{Duration, Utc};
use rootcause::prelude::Report;
use std::sync::Arc;
use tracing::{error, instrument};

/// Resolves the application user for an approved sign-in and builds its token.
#[derive(Clone)]
pub struct TokenEnricher {
    store: Arc<dyn UserStore>,
    ttl: Duration,
}

impl TokenEnricher {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// How long issued tokens stay valid.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Builds the session token for an approved sign-in.
    ///
    /// The user store is called exactly once, with the asserted email.
    ///
    /// # Errors
    ///
    /// Returns `MissingClaim` if the account has no email, and `UserStore`
    /// if the store fails. No token is produced in either case.
    #[instrument(skip_all, fields(provider = %approved.account().provider))]
    pub async fn enrich(
        &self,
        approved: ApprovedSignIn,
    ) -> Result<SessionToken, Report<AuthenticationError>> {
        let account = approved.into_account();
        let email = match account.email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => {
                return Err(AuthenticationError::MissingClaim {
                    claim: "email".to_string(),
                }
                .into());
            }
        };

        let user = self.store.resolve_or_create(email).await.map_err(|e| {
            error!(error = %e, "failed to resolve user");
            AuthenticationError::UserStore {
                reason: e.to_string(),
            }
        })?;

        Ok(SessionToken::new(
            account.subject.clone(),
            user.id(),
            user.user_type(),
            account.email.clone(),
            account.name.clone(),
            account.image.clone(),
            Utc::now(),
            self.ttl,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessConfig;
    use crate::error::UserStoreError;
    use crate::gate::{GateDecision, SignInGate};
    use crate::provider::{ProviderAccount, ProviderKind, TestCredentials};
    use crate::store::InMemoryUserStore;
    use crate::user::{User, UserType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UserStore for FailingStore {
        async fn resolve_or_create(&self, _email: &str) -> Result<User, Report<UserStoreError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(UserStoreError::Unavailable {
                details: "connection refused".to_string(),
            }
            .into())
        }
    }

    fn approve(account: ProviderAccount) -> ApprovedSignIn {
        let gate =
            SignInGate::new(&AccessConfig::new("secret".to_string()).with_test_environment(true));
        match gate.evaluate(account) {
            GateDecision::Approved(approved) => approved,
            GateDecision::Denied(reason) => panic!("unexpected denial: {reason}"),
        }
    }

    #[tokio::test]
    async fn enriches_test_account_with_regular_user() {
        let store = Arc::new(InMemoryUserStore::new());
        let enricher = TokenEnricher::new(store.clone(), Duration::hours(1));
        let account = TestCredentials::new("x@playwright.com")
            .authorize()
            .expect("accepted");

        let token = enricher.enrich(approve(account)).await.expect("enrich");

        assert_eq!(token.user_type(), UserType::Regular);
        assert!(!token.user_id().to_string().is_empty());
        assert_eq!(token.subject(), "test-x@playwright.com");
        assert_eq!(token.email(), Some("x@playwright.com"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn repeated_sign_in_reuses_user() {
        let store = Arc::new(InMemoryUserStore::new());
        let enricher = TokenEnricher::new(store.clone(), Duration::hours(1));
        let account = ProviderAccount::new(ProviderKind::Google, "g-1".to_string())
            .with_email(Some("alice@xyz.vc".to_string()));

        let first = enricher
            .enrich(approve(account.clone()))
            .await
            .expect("first");
        let second = enricher.enrich(approve(account)).await.expect("second");

        assert_eq!(first.user_id(), second.user_id());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn store_failure_fails_enrichment() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let enricher = TokenEnricher::new(store.clone(), Duration::hours(1));
        let account = ProviderAccount::new(ProviderKind::Google, "g-1".to_string())
            .with_email(Some("alice@xyz.vc".to_string()));

        let err = enricher.enrich(approve(account)).await.unwrap_err();

        assert!(err.to_string().contains("user store failure"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_email_is_rejected_before_store() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let enricher = TokenEnricher::new(store.clone(), Duration::hours(1));
        let account = ProviderAccount::new(ProviderKind::Playwright, "test-".to_string());

        let err = enricher.enrich(approve(account)).await.unwrap_err();

        assert!(err.to_string().contains("missing required claim: email"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }
}
