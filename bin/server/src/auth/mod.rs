//! Authentication module for the xyz-chat server.
//!
//! This module provides:
//! - Google OAuth sign-in restricted to the configured domain
//! - The test credential sign-in used by browser automation (test environments only)
//! - Cookie-held signed session tokens, verified without a database lookup
//! - Authentication middleware/extractors for Axum routes
//!
//! The decision logic (provider registry, gate, enrichment, signing) lives in
//! `xyz-chat-platform-access`; this module is the HTTP surface around it.

pub mod db;
pub mod google;
pub mod middleware;
pub mod routes;

use crate::config::{PublicConfig, SessionConfig};
use xyz_chat_platform_access::SignInService;

pub use google::GoogleOAuthClient;
pub use middleware::{OptionalAuth, RequireAuth, redirect_unauthenticated};
pub use routes::router;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Shared application state.
pub struct AppState {
    /// Sign-in pipeline and token verification.
    pub sign_in: SignInService,
    /// Google OAuth client.
    pub google: GoogleOAuthClient,
    /// Session configuration.
    pub session_config: SessionConfig,
    /// Settings exposed to the browser.
    pub public: PublicConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        sign_in: SignInService,
        google: GoogleOAuthClient,
        session_config: SessionConfig,
        public: PublicConfig,
    ) -> Self {
        Self {
            sign_in,
            google,
            session_config,
            public,
        }
    }
}
