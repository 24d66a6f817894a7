//! Google OAuth client for user sign-in.
//!
//! Handles the authorization redirect, the code exchange and the userinfo
//! lookup. Whether the resulting account may sign in is decided by the
//! sign-in gate, not here; the `hd` parameter only narrows Google's account
//! chooser.

use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EmptyExtraTokenFields,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, StandardTokenResponse, TokenResponse,
    TokenUrl,
    basic::{BasicClient, BasicTokenType},
};
use serde::Deserialize;
use std::fmt;
use xyz_chat_platform_access::{GoogleOAuthConfig, ProviderAccount, ProviderKind};

/// Google OAuth authorization URL.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth token URL.
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google OpenID Connect userinfo URL.
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

type GoogleTokenResponse = StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>;

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    client_id: ClientId,
    client_secret: ClientSecret,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
    scopes: Vec<String>,
    hosted_domain: String,
    http: reqwest::Client,
}

impl GoogleOAuthClient {
    /// Creates a client from configuration.
    ///
    /// `hosted_domain` is sent as the `hd` parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &GoogleOAuthConfig, hosted_domain: &str) -> Result<Self, GoogleOAuthError> {
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string())
            .map_err(|e| GoogleOAuthError::Configuration(format!("invalid auth URL: {e}")))?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
            .map_err(|e| GoogleOAuthError::Configuration(format!("invalid token URL: {e}")))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| GoogleOAuthError::Configuration(format!("invalid redirect URL: {e}")))?;

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GoogleOAuthError::Configuration(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client_id: ClientId::new(config.client_id().to_string()),
            client_secret: ClientSecret::new(config.client_secret().to_string()),
            auth_url,
            token_url,
            redirect_url,
            scopes: config.scopes().into_iter().map(str::to_string).collect(),
            hosted_domain: hosted_domain.to_string(),
            http,
        })
    }

    /// Generates the authorization URL.
    ///
    /// Returns the URL to redirect the user to, along with auth state to store.
    pub fn authorization_url(&self) -> (String, GoogleAuthState) {
        let client = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);

        for scope in &self.scopes {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }

        let (auth_url, csrf_token) = auth_request
            .add_extra_param("prompt", "consent")
            .add_extra_param("access_type", "offline")
            .add_extra_param("hd", self.hosted_domain.clone())
            .url();

        let state = GoogleAuthState {
            csrf_token: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };

        (auth_url.to_string(), state)
    }

    /// Exchanges the authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<String, GoogleOAuthError> {
        let client = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        let token_result: GoogleTokenResponse = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| GoogleOAuthError::TokenExchange(e.to_string()))?;

        Ok(token_result.access_token().secret().clone())
    }

    /// Fetches the signed-in user's profile.
    pub async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<GoogleProfile, GoogleOAuthError> {
        self.http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| GoogleOAuthError::Profile(e.to_string()))?
            .json::<GoogleProfile>()
            .await
            .map_err(|e| GoogleOAuthError::Profile(e.to_string()))
    }
}

/// State stored during the OAuth flow.
#[derive(Debug, Clone)]
pub struct GoogleAuthState {
    pub csrf_token: String,
    pub pkce_verifier: String,
}

/// Profile returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleProfile {
    /// Converts the profile into a provider account for the sign-in gate.
    #[must_use]
    pub fn into_account(self) -> ProviderAccount {
        ProviderAccount::new(ProviderKind::Google, self.sub)
            .with_email(self.email)
            .with_name(self.name)
            .with_image(self.picture)
    }
}

/// Google OAuth errors.
#[derive(Debug)]
pub enum GoogleOAuthError {
    /// Configuration error.
    Configuration(String),
    /// Token exchange failed.
    TokenExchange(String),
    /// Userinfo lookup failed.
    Profile(String),
}

impl fmt::Display for GoogleOAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::TokenExchange(msg) => write!(f, "Token exchange error: {msg}"),
            Self::Profile(msg) => write!(f, "Profile lookup error: {msg}"),
        }
    }
}

impl std::error::Error for GoogleOAuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleOAuthClient {
        let config = GoogleOAuthConfig::new(
            "client-123".to_string(),
            "secret".to_string(),
            "http://localhost:3000/auth/callback/google".to_string(),
        );
        GoogleOAuthClient::new(&config, "xyz.vc").expect("valid config")
    }

    #[test]
    fn authorization_url_carries_google_parameters() {
        let (url, state) = client().authorization_url();

        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("hd=xyz.vc"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains(&format!("state={}", state.csrf_token)));
        assert!(!state.pkce_verifier.is_empty());
    }

    #[test]
    fn invalid_redirect_uri_is_rejected() {
        let config = GoogleOAuthConfig::new(
            "client".to_string(),
            "secret".to_string(),
            "not a url".to_string(),
        );
        let result = GoogleOAuthClient::new(&config, "xyz.vc");
        assert!(matches!(result, Err(GoogleOAuthError::Configuration(_))));
    }

    #[test]
    fn profile_becomes_account() {
        let profile: GoogleProfile = serde_json::from_value(serde_json::json!({
            "sub": "1234",
            "email": "alice@xyz.vc",
            "name": "Alice",
            "picture": "https://example.com/alice.png"
        }))
        .expect("deserialize");

        let account = profile.into_account();
        assert_eq!(account.provider, ProviderKind::Google);
        assert_eq!(account.subject, "1234");
        assert_eq!(account.email.as_deref(), Some("alice@xyz.vc"));
        assert_eq!(account.name.as_deref(), Some("Alice"));
    }
}
