//! The sign-in authorization gate.
//!
//! Every provider account passes through [`SignInGate::evaluate`] exactly
//! once. Only an approved decision yields an [`ApprovedSignIn`], and that is
//! the only input token enrichment accepts.

use crate::config::AccessConfig;
use crate::provider::{ProviderAccount, ProviderKind};
use std::fmt;
use tracing::{debug, info};

/// Why a sign-in attempt was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The email is missing or outside the allowed domain.
    DomainNotAllowed { email: Option<String> },
    /// The test provider was used outside a test environment.
    TestProviderDisabled,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainNotAllowed { email: Some(email) } => {
                write!(f, "email domain '{}' is not allowed", email_domain(email))
            }
            Self::DomainNotAllowed { email: None } => {
                write!(f, "no email asserted by the provider")
            }
            Self::TestProviderDisabled => {
                write!(f, "test provider is disabled outside test environments")
            }
        }
    }
}

/// A sign-in the gate has approved.
#[derive(Debug, Clone)]
pub struct ApprovedSignIn {
    account: ProviderAccount,
    // Keeps construction private to the gate.
    _approved: (),
}

impl ApprovedSignIn {
    #[must_use]
    pub fn account(&self) -> &ProviderAccount {
        &self.account
    }

    #[must_use]
    pub fn into_account(self) -> ProviderAccount {
        self.account
    }
}

/// Outcome of evaluating a sign-in attempt.
#[derive(Debug, Clone)]
pub enum GateDecision {
    Approved(ApprovedSignIn),
    Denied(DenialReason),
}

impl GateDecision {
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// Decides whether a provider account may sign in.
#[derive(Debug, Clone)]
pub struct SignInGate {
    allowed_domain: String,
    test_environment: bool,
}

impl SignInGate {
    #[must_use]
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            allowed_domain: config.allowed_domain().to_string(),
            test_environment: config.test_environment(),
        }
    }

    #[must_use]
    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// Evaluates a sign-in attempt.
    ///
    /// Test provider accounts are approved unconditionally in a test
    /// environment. Google accounts are approved only when the email ends
    /// with `@<allowed domain>`; the comparison is case-sensitive.
    #[must_use]
    pub fn evaluate(&self, account: ProviderAccount) -> GateDecision {
        match account.provider {
            ProviderKind::Playwright if self.test_environment => self.approve(account),
            ProviderKind::Playwright => {
                info!(subject = %account.subject, "test provider sign-in rejected");
                GateDecision::Denied(DenialReason::TestProviderDisabled)
            }
            ProviderKind::Google => {
                let suffix = format!("@{}", self.allowed_domain);
                let in_domain = account
                    .email
                    .as_deref()
                    .is_some_and(|email| !email.is_empty() && email.ends_with(&suffix));
                if in_domain {
                    return self.approve(account);
                }

                let email = account.email.as_deref().unwrap_or_default();
                info!(
                    email_domain = email_domain(email),
                    allowed_domain = %self.allowed_domain,
                    "sign-in denied: email outside allowed domain"
                );
                debug!(email, "denied email");
                GateDecision::Denied(DenialReason::DomainNotAllowed {
                    email: account.email,
                })
            }
        }
    }

    fn approve(&self, account: ProviderAccount) -> GateDecision {
        debug!(provider = %account.provider, subject = %account.subject, "sign-in approved");
        GateDecision::Approved(ApprovedSignIn {
            account,
            _approved: (),
        })
    }
}

/// Domain part of an email, for logs that must not carry the address.
fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map_or("", |(_, domain)| domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(test_environment: bool) -> SignInGate {
        SignInGate::new(
            &AccessConfig::new("secret".to_string()).with_test_environment(test_environment),
        )
    }

    fn google(email: Option<&str>) -> ProviderAccount {
        ProviderAccount::new(ProviderKind::Google, "google-sub".to_string())
            .with_email(email.map(str::to_string))
    }

    #[test]
    fn google_account_in_allowed_domain_is_approved() {
        let decision = gate(false).evaluate(google(Some("user@xyz.vc")));
        match decision {
            GateDecision::Approved(approved) => {
                assert_eq!(approved.account().email.as_deref(), Some("user@xyz.vc"));
            }
            GateDecision::Denied(reason) => panic!("expected approval, got {reason}"),
        }
    }

    #[test]
    fn google_account_outside_domain_is_denied() {
        for email in [
            "user@other.com",
            "user@xyz.vc.evil.com",
            "user@subxyz.vc",
            "USER@XYZ.VC",
            "",
        ] {
            let decision = gate(false).evaluate(google(Some(email)));
            assert!(
                matches!(decision, GateDecision::Denied(DenialReason::DomainNotAllowed { .. })),
                "{email} should be denied"
            );
        }
    }

    #[test]
    fn google_account_without_email_is_denied() {
        let decision = gate(true).evaluate(google(None));
        assert!(matches!(
            decision,
            GateDecision::Denied(DenialReason::DomainNotAllowed { email: None })
        ));
    }

    #[test]
    fn test_provider_approved_in_test_environment() {
        let account = ProviderAccount::new(ProviderKind::Playwright, "test-x".to_string())
            .with_email(Some("x@playwright.com".to_string()));
        assert!(gate(true).evaluate(account).is_approved());
    }

    #[test]
    fn test_provider_denied_outside_test_environment() {
        let account = ProviderAccount::new(ProviderKind::Playwright, "test-x".to_string())
            .with_email(Some("x@playwright.com".to_string()));
        assert!(matches!(
            gate(false).evaluate(account),
            GateDecision::Denied(DenialReason::TestProviderDisabled)
        ));
    }

    #[test]
    fn custom_domain_is_respected() {
        let gate = SignInGate::new(
            &AccessConfig::new("secret".to_string()).with_allowed_domain("example.com".to_string()),
        );
        assert!(gate.evaluate(google(Some("a@example.com"))).is_approved());
        assert!(!gate.evaluate(google(Some("a@xyz.vc"))).is_approved());
    }

    #[test]
    fn denial_logs_domain_only() {
        assert_eq!(email_domain("alice@other.com"), "other.com");
        assert_eq!(email_domain("a@b@evil.com"), "evil.com");
        assert_eq!(email_domain("no-at-sign"), "");
        assert_eq!(email_domain(""), "");
    }

    #[test]
    fn denial_display_omits_address() {
        let reason = DenialReason::DomainNotAllowed {
            email: Some("alice@other.com".to_string()),
        };
        let text = reason.to_string();
        assert!(text.contains("other.com"), "{text}");
        assert!(!text.contains("alice"), "{text}");
    }
}
