//! Sign-in, token enrichment and session projection for xyz-chat.
//!
//! This crate provides:
//! - The provider registry and test credential provider (`ProviderRegistry`, `TestCredentials`)
//! - The sign-in gate restricting Google accounts to one domain (`SignInGate`)
//! - Users, user types and entitlements (`User`, `UserType`, `Entitlements`)
//! - The user store contract (`UserStore`, `InMemoryUserStore`)
//! - Signed session tokens and the session projected from them
//!
//! # Example
//!
//! ```
//! use xyz_chat_platform_access::{
//!     AccessConfig, GateDecision, ProviderAccount, ProviderKind, SignInGate,
//! };
//!
//! let gate = SignInGate::new(&AccessConfig::new("secret".to_string()));
//!
//! let alice = ProviderAccount::new(ProviderKind::Google, "1234".to_string())
//!     .with_email(Some("alice@xyz.vc".to_string()));
//! assert!(gate.evaluate(alice).is_approved());
//!
//! let mallory = ProviderAccount::new(ProviderKind::Google, "5678".to_string())
//!     .with_email(Some("mallory@example.com".to_string()));
//! assert!(matches!(gate.evaluate(mallory), GateDecision::Denied(_)));
//! ```

pub mod auth;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod gate;
pub mod provider;
pub mod session;
pub mod store;
pub mod token;
pub mod user;

// Re-export main types at crate root
pub use auth::{AuthenticatedUser, SignInOutcome, SignInService};
pub use config::{AccessConfig, GoogleOAuthConfig};
pub use enrichment::TokenEnricher;
pub use error::{AuthenticationError, UserStoreError};
pub use gate::{ApprovedSignIn, DenialReason, GateDecision, SignInGate};
pub use provider::{
    ProviderAccount, ProviderDescriptor, ProviderKind, ProviderRegistry, TEST_USER_EMAIL,
    TestCredentials,
};
pub use session::{Session, SessionUser};
pub use store::{InMemoryUserStore, UserStore};
pub use token::{SessionToken, TokenSigner};
pub use user::{Entitlements, User, UserType};
