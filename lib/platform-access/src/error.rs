//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `AuthenticationError`: sign-in and token failures
//! - `UserStoreError`: failures of the backing user store

use std::fmt;

/// Errors from authentication operations.
///
/// A denied sign-in is not an error; see [`crate::gate::DenialReason`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No registered provider matches the identifier.
    UnknownProvider { provider: String },
    /// The identity provider returned an error or an unusable response.
    ProviderError { provider: String, reason: String },
    /// A required claim is missing from the provider account.
    MissingClaim { claim: String },
    /// The user store could not resolve the user.
    UserStore { reason: String },
    /// The session token could not be signed.
    TokenIssue { reason: String },
    /// Session token validation failed.
    InvalidToken { reason: String },
    /// Session token has expired.
    TokenExpired,
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProvider { provider } => {
                write!(f, "no matching provider: {provider}")
            }
            Self::ProviderError { provider, reason } => {
                write!(f, "provider '{provider}' error: {reason}")
            }
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
            Self::UserStore { reason } => {
                write!(f, "user store failure: {reason}")
            }
            Self::TokenIssue { reason } => {
                write!(f, "failed to issue session token: {reason}")
            }
            Self::InvalidToken { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::TokenExpired => {
                write!(f, "token has expired")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Errors from user store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStoreError {
    /// The store could not be reached or the query failed.
    Unavailable { details: String },
    /// A stored record could not be converted into a user.
    InvalidRecord { details: String },
}

impl fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "user store unavailable: {details}")
            }
            Self::InvalidRecord { details } => {
                write!(f, "invalid user record: {details}")
            }
        }
    }
}

impl std::error::Error for UserStoreError {}
