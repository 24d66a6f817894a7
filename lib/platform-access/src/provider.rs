//! Identity providers and the accounts they assert.
//!
//! The set of providers is static. A [`ProviderRegistry`] is built once at
//! startup by filtering that set through the test-environment flag, so the
//! test credential provider simply does not exist in production.

use crate::error::AuthenticationError;
use rootcause::Report;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Email domain fragment the test credential provider accepts.
pub const TEST_EMAIL_DOMAIN: &str = "@playwright.com";

/// Account used by the login page's test sign-in control.
pub const TEST_USER_EMAIL: &str = "test@playwright.com";

/// Display name given to every test credential account.
const TEST_USER_NAME: &str = "Test User";

/// The identity providers this application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google OAuth, restricted to the allowed domain.
    Google,
    /// Credential provider for browser automation.
    Playwright,
}

impl ProviderKind {
    /// Returns the provider identifier used in routes and tokens.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Playwright => "playwright",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = Report<AuthenticationError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            "playwright" => Ok(Self::Playwright),
            other => Err(AuthenticationError::UnknownProvider {
                provider: other.to_string(),
            }
            .into()),
        }
    }
}

/// Static description of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub kind: ProviderKind,
    pub display_name: &'static str,
    /// Only registered in test environments.
    pub test_only: bool,
}

/// Every provider the application can register.
pub const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        kind: ProviderKind::Google,
        display_name: "Google",
        test_only: false,
    },
    ProviderDescriptor {
        kind: ProviderKind::Playwright,
        display_name: "Playwright",
        test_only: true,
    },
];

/// The providers registered for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Builds the registry, dropping test-only providers outside a test environment.
    #[must_use]
    pub fn from_environment(test_environment: bool) -> Self {
        let providers = PROVIDERS
            .iter()
            .filter(|descriptor| test_environment || !descriptor.test_only)
            .copied()
            .collect();
        Self { providers }
    }

    /// Returns the descriptor for a registered provider.
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|descriptor| descriptor.kind == kind)
    }

    /// Resolves a provider identifier against the registry.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` if the identifier is not a known provider
    /// or the provider is not registered in this environment.
    pub fn find(&self, id: &str) -> Result<&ProviderDescriptor, Report<AuthenticationError>> {
        let kind: ProviderKind = id.parse()?;
        self.get(kind).ok_or_else(|| {
            AuthenticationError::UnknownProvider {
                provider: id.to_string(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.get(kind).is_some()
    }

    /// Iterates over the registered providers.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }
}

/// An account asserted by an identity provider, before the gate has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAccount {
    /// The provider that asserted the account.
    pub provider: ProviderKind,
    /// The provider's unique identifier for the account.
    pub subject: String,
    /// Asserted email address.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

impl ProviderAccount {
    #[must_use]
    pub fn new(provider: ProviderKind, subject: String) -> Self {
        Self {
            provider,
            subject,
            email: None,
            name: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// Credentials submitted to the test provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestCredentials {
    pub email: Option<String>,
}

impl TestCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    /// Turns the credentials into an account, or `None` if they are rejected.
    ///
    /// Only emails containing [`TEST_EMAIL_DOMAIN`] are accepted.
    #[must_use]
    pub fn authorize(&self) -> Option<ProviderAccount> {
        let email = self.email.as_deref()?;
        if !email.contains(TEST_EMAIL_DOMAIN) {
            return None;
        }

        Some(
            ProviderAccount::new(ProviderKind::Playwright, format!("test-{email}"))
                .with_email(Some(email.to_string()))
                .with_name(Some(TEST_USER_NAME.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids() {
        assert_eq!(ProviderKind::Google.id(), "google");
        assert_eq!(ProviderKind::Playwright.to_string(), "playwright");
        assert_eq!(
            "google".parse::<ProviderKind>().expect("parse"),
            ProviderKind::Google
        );
    }

    #[test]
    fn unknown_provider_id_is_rejected() {
        let err = "github".parse::<ProviderKind>().unwrap_err();
        assert!(err.to_string().contains("no matching provider: github"));
    }

    #[test]
    fn registry_in_test_environment_has_both_providers() {
        let registry = ProviderRegistry::from_environment(true);
        assert!(registry.contains(ProviderKind::Google));
        assert!(registry.contains(ProviderKind::Playwright));
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn registry_outside_test_environment_has_no_test_provider() {
        let registry = ProviderRegistry::from_environment(false);
        assert!(registry.contains(ProviderKind::Google));
        assert!(!registry.contains(ProviderKind::Playwright));

        let err = registry.find("playwright").unwrap_err();
        assert!(err.to_string().contains("no matching provider"));
    }

    #[test]
    fn registry_find_unknown_id() {
        let registry = ProviderRegistry::from_environment(true);
        assert!(registry.find("github").is_err());
        assert_eq!(
            registry.find("google").expect("registered").display_name,
            "Google"
        );
    }

    #[test]
    fn test_credentials_accept_playwright_email() {
        let account = TestCredentials::new("x@playwright.com")
            .authorize()
            .expect("accepted");
        assert_eq!(account.provider, ProviderKind::Playwright);
        assert_eq!(account.subject, "test-x@playwright.com");
        assert_eq!(account.email.as_deref(), Some("x@playwright.com"));
        assert_eq!(account.name.as_deref(), Some("Test User"));
    }

    #[test]
    fn test_credentials_reject_other_emails() {
        assert!(TestCredentials::new("x@xyz.vc").authorize().is_none());
        assert!(TestCredentials::new("").authorize().is_none());
        assert!(TestCredentials::default().authorize().is_none());
    }

    #[test]
    fn provider_account_builder() {
        let account = ProviderAccount::new(ProviderKind::Google, "1234".to_string())
            .with_email(Some("alice@xyz.vc".to_string()))
            .with_name(Some("Alice".to_string()))
            .with_image(Some("https://example.com/a.png".to_string()));

        assert_eq!(account.subject, "1234");
        assert_eq!(account.email.as_deref(), Some("alice@xyz.vc"));
        assert_eq!(account.name.as_deref(), Some("Alice"));
        assert_eq!(account.image.as_deref(), Some("https://example.com/a.png"));
    }
}
