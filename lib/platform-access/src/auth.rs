//! The sign-in pipeline: provider account → gate → enrichment → signed token.
//!
//! This module provides:
//! - `SignInService`: owns the provider registry, gate, enricher and signer
//! - `SignInOutcome`: the result of a sign-in attempt
//! - `AuthenticatedUser`: the session of a verified request

use crate::config::AccessConfig;
use crate::enrichment::TokenEnricher;
use crate::error::AuthenticationError;
use crate::gate::{DenialReason, GateDecision, SignInGate};
use crate::provider::{ProviderAccount, ProviderKind, ProviderRegistry, TestCredentials};
use crate::session::Session;
use crate::store::UserStore;
use crate::token::{SessionToken, TokenSigner};
use crate::user::UserType;
use chrono::Duration;
use rootcause::prelude::Report;
use std::sync::Arc;
use tracing::{info, instrument};
use xyz_chat_core::UserId;

/// Represents an authenticated user context extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    session: Session,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Returns the authenticated user's ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.session.user_id()
    }

    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.session.user_type()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Result of a sign-in attempt.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    /// The attempt was approved and a token issued.
    SignedIn {
        token: Box<SessionToken>,
        /// The signed token, ready for the session cookie.
        encoded: String,
    },
    /// The gate denied the attempt.
    Denied(DenialReason),
}

/// Runs sign-in attempts and verifies issued tokens.
#[derive(Clone)]
pub struct SignInService {
    providers: ProviderRegistry,
    gate: SignInGate,
    enricher: TokenEnricher,
    signer: TokenSigner,
}

impl SignInService {
    /// Creates the service from the access configuration.
    ///
    /// Tokens are signed with the configured secret and live for `ttl`.
    #[must_use]
    pub fn new(config: &AccessConfig, store: Arc<dyn UserStore>, ttl: Duration) -> Self {
        Self {
            providers: ProviderRegistry::from_environment(config.test_environment()),
            gate: SignInGate::new(config),
            enricher: TokenEnricher::new(store, ttl),
            signer: TokenSigner::new(config.secret()),
        }
    }

    #[must_use]
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    #[must_use]
    pub fn allowed_domain(&self) -> &str {
        self.gate.allowed_domain()
    }

    /// Returns how long issued tokens stay valid.
    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        self.enricher.ttl()
    }

    /// Checks test credentials against the test provider.
    ///
    /// Returns `Ok(None)` when the credentials are rejected.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` if the test provider is not registered.
    pub fn authorize_credentials(
        &self,
        credentials: &TestCredentials,
    ) -> Result<Option<ProviderAccount>, Report<AuthenticationError>> {
        self.providers.find(ProviderKind::Playwright.id())?;
        Ok(credentials.authorize())
    }

    /// Runs a provider account through the gate, enrichment and signing.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not registered, enrichment fails
    /// or the token cannot be signed. A denial is not an error.
    #[instrument(skip_all, fields(provider = %account.provider))]
    pub async fn sign_in(
        &self,
        account: ProviderAccount,
    ) -> Result<SignInOutcome, Report<AuthenticationError>> {
        self.providers.find(account.provider.id())?;

        let approved = match self.gate.evaluate(account) {
            GateDecision::Approved(approved) => approved,
            GateDecision::Denied(reason) => return Ok(SignInOutcome::Denied(reason)),
        };

        let token = self.enricher.enrich(approved).await?;
        let encoded = self.signer.sign(&token)?;

        info!(user_id = %token.user_id(), "user signed in");

        Ok(SignInOutcome::SignedIn {
            token: Box::new(token),
            encoded,
        })
    }

    /// Verifies a session cookie value and projects its session.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` or `InvalidToken` if verification fails.
    pub fn authenticate(
        &self,
        encoded: &str,
    ) -> Result<AuthenticatedUser, Report<AuthenticationError>> {
        let token = self.signer.verify(encoded)?;
        Ok(AuthenticatedUser::new(Session::from_token(&token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;

    fn service(test_environment: bool) -> (SignInService, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        let config =
            AccessConfig::new("test-secret".to_string()).with_test_environment(test_environment);
        (
            SignInService::new(&config, store.clone(), Duration::hours(1)),
            store,
        )
    }

    fn google(email: &str) -> ProviderAccount {
        ProviderAccount::new(ProviderKind::Google, "g-123".to_string())
            .with_email(Some(email.to_string()))
    }

    #[tokio::test]
    async fn google_sign_in_round_trips_through_authenticate() {
        let (service, _) = service(false);

        let outcome = service.sign_in(google("alice@xyz.vc")).await.expect("sign in");
        let SignInOutcome::SignedIn { token, encoded } = outcome else {
            panic!("expected sign in");
        };

        let user = service.authenticate(&encoded).expect("authenticate");
        assert_eq!(user.user_id(), token.user_id());
        assert_eq!(user.user_type(), UserType::Regular);
        assert_eq!(user.session().user.email.as_deref(), Some("alice@xyz.vc"));
    }

    #[tokio::test]
    async fn denied_sign_in_does_not_touch_store() {
        let (service, store) = service(false);

        let outcome = service.sign_in(google("alice@other.com")).await.expect("evaluate");

        assert!(matches!(
            outcome,
            SignInOutcome::Denied(DenialReason::DomainNotAllowed { .. })
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_provider_sign_in_in_test_environment() {
        let (service, _) = service(true);

        let account = service
            .authorize_credentials(&TestCredentials::new("x@playwright.com"))
            .expect("registered")
            .expect("accepted");
        let outcome = service.sign_in(account).await.expect("sign in");

        let SignInOutcome::SignedIn { token, .. } = outcome else {
            panic!("expected sign in");
        };
        assert_eq!(token.user_type(), UserType::Regular);
    }

    #[tokio::test]
    async fn test_provider_is_unknown_outside_test_environment() {
        let (service, store) = service(false);

        let err = service
            .authorize_credentials(&TestCredentials::new("x@playwright.com"))
            .unwrap_err();
        assert!(err.to_string().contains("no matching provider"));

        let account = ProviderAccount::new(ProviderKind::Playwright, "test-x".to_string())
            .with_email(Some("x@playwright.com".to_string()));
        assert!(service.sign_in(account).await.is_err());
        assert!(store.is_empty().await);
    }

    #[test]
    fn rejected_credentials_are_none() {
        let (service, _) = service(true);
        let result = service
            .authorize_credentials(&TestCredentials::new("x@xyz.vc"))
            .expect("registered");
        assert!(result.is_none());
    }

    #[test]
    fn authenticate_rejects_garbage() {
        let (service, _) = service(false);
        assert!(service.authenticate("nope").is_err());
    }
}
