//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`AccessConfig`](xyz_chat_platform_access::AccessConfig) and
//! [`GoogleOAuthConfig`](xyz_chat_platform_access::GoogleOAuthConfig) for the
//! sign-in settings.

use serde::Deserialize;
use xyz_chat_platform_access::{AccessConfig, GoogleOAuthConfig};

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Sign-in policy and token signing.
    pub auth: AccessConfig,

    /// Google OAuth client settings.
    pub google: GoogleOAuthConfig,

    /// Settings exposed to the browser.
    #[serde(default)]
    pub public: PublicConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long a session token stays valid, in hours.
    #[serde(default = "default_session_duration_hours")]
    pub duration_hours: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_hours() -> i64 {
    720
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_hours: default_session_duration_hours(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl SessionConfig {
    /// Returns the session duration.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.duration_hours)
    }
}

/// Flags the login page reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicConfig {
    /// Shows the test sign-in control on the login page.
    #[serde(default)]
    pub test_mode: bool,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.duration_hours, 720);
        assert!(config.secure_cookies);
        assert_eq!(config.duration(), chrono::Duration::days(30));
    }

    #[test]
    fn public_config_defaults_to_no_test_mode() {
        assert!(!PublicConfig::default().test_mode);
    }

    #[test]
    fn server_config_deserializes_with_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "database_url": "postgres://localhost/xyz_chat",
            "auth": { "secret": "s3cret" },
            "google": {
                "client_id": "id",
                "client_secret": "secret",
                "redirect_uri": "http://localhost:3000/auth/callback/google"
            }
        }))
        .expect("deserialize");

        assert_eq!(config.auth.allowed_domain(), "xyz.vc");
        assert!(!config.auth.test_environment());
        assert!(!config.public.test_mode);
        assert_eq!(config.session.duration_hours, 720);
    }
}
