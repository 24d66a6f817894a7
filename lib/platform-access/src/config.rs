//! Configuration for sign-in and the Google OAuth client.
//!
//! Both types deserialize from the server's environment configuration;
//! fields with defaults can be omitted.

use serde::{Deserialize, Serialize};

/// Sign-in policy and token signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Secret used to sign session tokens.
    secret: String,
    /// The only email domain Google sign-ins are accepted from.
    /// Default: "xyz.vc"
    #[serde(default = "default_allowed_domain")]
    allowed_domain: String,
    /// Registers the test credential provider when true.
    /// Default: false
    #[serde(default)]
    test_environment: bool,
}

fn default_allowed_domain() -> String {
    "xyz.vc".to_string()
}

impl AccessConfig {
    /// Creates a configuration with the default domain, outside a test environment.
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            allowed_domain: default_allowed_domain(),
            test_environment: false,
        }
    }

    /// Sets the allowed email domain.
    #[must_use]
    pub fn with_allowed_domain(mut self, domain: String) -> Self {
        self.allowed_domain = domain;
        self
    }

    /// Sets whether this is a test environment.
    #[must_use]
    pub fn with_test_environment(mut self, test_environment: bool) -> Self {
        self.test_environment = test_environment;
        self
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    #[must_use]
    pub fn test_environment(&self) -> bool {
        self.test_environment
    }
}

/// Credentials and settings for the Google OAuth client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOAuthConfig {
    /// The OAuth2 client ID registered with Google.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the callback (e.g., "https://chat.xyz.vc/auth/callback/google").
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,email,profile"
    #[serde(default = "default_scopes")]
    scopes: String,
}

fn default_scopes() -> String {
    "openid,email,profile".to_string()
}

impl GoogleOAuthConfig {
    /// Creates a new configuration with the default scopes.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
        }
    }

    /// Overrides the requested scopes (comma-separated).
    #[must_use]
    pub fn with_scopes(mut self, scopes: String) -> Self {
        self.scopes = scopes;
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_config_defaults() {
        let config = AccessConfig::new("secret".to_string());
        assert_eq!(config.allowed_domain(), "xyz.vc");
        assert!(!config.test_environment());
        assert_eq!(config.secret(), "secret");
    }

    #[test]
    fn access_config_deserializes_with_defaults() {
        let config: AccessConfig =
            serde_json::from_str(r#"{"secret":"s3cret"}"#).expect("deserialize");
        assert_eq!(config.allowed_domain(), "xyz.vc");
        assert!(!config.test_environment());
    }

    #[test]
    fn access_config_builder() {
        let config = AccessConfig::new("secret".to_string())
            .with_allowed_domain("example.com".to_string())
            .with_test_environment(true);
        assert_eq!(config.allowed_domain(), "example.com");
        assert!(config.test_environment());
    }

    #[test]
    fn google_scopes_default_and_override() {
        let config = GoogleOAuthConfig::new(
            "client".to_string(),
            "secret".to_string(),
            "http://localhost:3000/auth/callback/google".to_string(),
        );
        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);

        let config = config.with_scopes("openid, email,".to_string());
        assert_eq!(config.scopes(), vec!["openid", "email"]);
    }
}
