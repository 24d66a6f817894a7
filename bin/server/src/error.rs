//! Domain error types for server operations.
//!
//! This module provides typed error variants for server-side operations,
//! each convertible into a user-safe `ServerFnError`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Session-related errors.
#[derive(Debug)]
pub enum SessionError {
    /// User is not authenticated (no valid session cookie).
    NotAuthenticated,
    /// Application state is missing from the request.
    StateUnavailable { details: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::StateUnavailable { details } => {
                write!(f, "application state unavailable: {}", details)
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SessionError::NotAuthenticated => ServerFnError::new("Not authenticated"),
            SessionError::StateUnavailable { .. } => ServerFnError::new("Internal error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_display() {
        assert_eq!(SessionError::NotAuthenticated.to_string(), "not authenticated");
        let err = SessionError::StateUnavailable {
            details: "missing extension".to_string(),
        };
        assert!(err.to_string().contains("missing extension"));
    }

    #[test]
    fn server_error_hides_details() {
        let err = SessionError::StateUnavailable {
            details: "secret detail".to_string(),
        }
        .into_server_error();
        assert!(!err.to_string().contains("secret detail"));
    }
}
