//! Authentication routes for sign-in, callbacks, and sign-out.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;
use xyz_chat_platform_access::{
    DenialReason, ProviderAccount, ProviderKind, Session, SignInOutcome, TestCredentials,
};

use super::{AppState, SESSION_COOKIE, middleware::OptionalAuth};

/// Auth state cookie name (for CSRF protection during the OAuth flow).
const AUTH_STATE_COOKIE: &str = "auth_state";

/// Builds the authentication routes.
///
/// The test credential callback is only mounted when the test provider is
/// registered; otherwise requests to it fall through to a 404.
pub fn router<S>(state: Arc<AppState>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/auth/signin/google", get(signin_google))
        .route("/auth/callback/google", get(callback_google))
        .route("/auth/signout", get(signout))
        .route("/auth/session", get(session))
        .route("/ping", get(ping));

    if state.sign_in.providers().contains(ProviderKind::Playwright) {
        router = router.route("/auth/callback/playwright", post(callback_playwright));
    }

    router.with_state(state)
}

/// Query parameters for starting the Google sign-in.
#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    callback_url: Option<String>,
}

/// Query parameters for the Google callback.
#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Serializable auth state for cookie storage.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct AuthStateData {
    csrf_token: String,
    pkce_verifier: String,
    callback_url: String,
}

/// Redirects to Google's consent screen.
pub async fn signin_google(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SignInQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    let (auth_url, auth_state) = state.google.authorization_url();

    let auth_state_json = serde_json::to_string(&AuthStateData {
        csrf_token: auth_state.csrf_token,
        pkce_verifier: auth_state.pkce_verifier,
        callback_url: safe_callback_url(query.callback_url.as_deref()),
    })
    .map_err(|e| AuthError::Callback(format!("serialize auth state: {e}")))?;

    let cookie = Cookie::build((AUTH_STATE_COOKIE, auth_state_json))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(10));

    Ok((jar.add(cookie), Redirect::to(&auth_url)))
}

/// Handles the callback after the user authenticates with Google.
pub async fn callback_google(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoogleCallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    if let Some(error) = query.error {
        return Err(AuthError::OAuthCallback(format!("provider returned {error}")));
    }

    let auth_state_cookie = jar
        .get(AUTH_STATE_COOKIE)
        .ok_or_else(|| AuthError::OAuthCallback("missing auth state".to_string()))?;

    let auth_state: AuthStateData = serde_json::from_str(auth_state_cookie.value())
        .map_err(|_| AuthError::OAuthCallback("invalid auth state".to_string()))?;

    if query.state.as_deref() != Some(auth_state.csrf_token.as_str()) {
        return Err(AuthError::OAuthCallback("CSRF token mismatch".to_string()));
    }

    let code = query
        .code
        .ok_or_else(|| AuthError::OAuthCallback("missing authorization code".to_string()))?;

    let access_token = state
        .google
        .exchange_code(&code, &auth_state.pkce_verifier)
        .await
        .map_err(|e| AuthError::OAuthCallback(e.to_string()))?;

    let profile = state
        .google
        .fetch_profile(&access_token)
        .await
        .map_err(|e| AuthError::OAuthCallback(e.to_string()))?;

    complete_sign_in(&state, jar, profile.into_account(), &auth_state.callback_url).await
}

/// Handles a test credential sign-in.
pub async fn callback_playwright(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(credentials): Form<TestCredentials>,
) -> Result<impl IntoResponse, AuthError> {
    let account = state
        .sign_in
        .authorize_credentials(&credentials)
        .map_err(|_| AuthError::UnknownProvider)?
        .ok_or(AuthError::CredentialsSignin)?;

    complete_sign_in(&state, jar, account, "/").await
}

/// Runs the sign-in pipeline and sets the session cookie.
async fn complete_sign_in(
    state: &AppState,
    jar: CookieJar,
    account: ProviderAccount,
    callback_url: &str,
) -> Result<(CookieJar, Redirect), AuthError> {
    let encoded = match state.sign_in.sign_in(account).await {
        Ok(SignInOutcome::SignedIn { encoded, .. }) => encoded,
        Ok(SignInOutcome::Denied(reason)) => return Err(AuthError::AccessDenied(reason)),
        Err(e) => return Err(AuthError::Callback(e.to_string())),
    };

    let session_cookie = Cookie::build((SESSION_COOKIE, encoded))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::hours(state.session_config.duration_hours));

    let remove_auth_state = Cookie::build((AUTH_STATE_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    let jar = jar.add(session_cookie).add(remove_auth_state);

    Ok((jar, Redirect::to(callback_url)))
}

/// Signs the user out by removing the session cookie.
pub async fn signout(jar: CookieJar) -> impl IntoResponse {
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/login"))
}

/// Returns the current session, or `null` when signed out.
pub async fn session(OptionalAuth(user): OptionalAuth) -> Json<Option<Session>> {
    Json(user.map(|user| user.session().clone()))
}

/// Liveness probe.
pub async fn ping() -> &'static str {
    "pong"
}

/// Restricts post-sign-in redirects to same-site paths.
///
/// Browsers drop tabs and newlines before parsing a URL, so any whitespace
/// or control character could turn a path into a protocol-relative URL.
fn safe_callback_url(raw: Option<&str>) -> String {
    match raw {
        Some(url) if is_bare_path(url) => url.to_string(),
        _ => "/".to_string(),
    }
}

fn is_bare_path(url: &str) -> bool {
    url.starts_with('/')
        && !url.starts_with("//")
        && !url
            .chars()
            .any(|c| c == '\\' || c.is_whitespace() || c.is_control())
}

/// Authentication errors.
///
/// Every variant except `UnknownProvider` sends the browser back to the
/// login page with an `error` code the page can display.
#[derive(Debug)]
pub enum AuthError {
    /// The gate denied the sign-in.
    AccessDenied(DenialReason),
    /// The test credentials were rejected.
    CredentialsSignin,
    /// The OAuth handshake failed (state, CSRF, code exchange, profile).
    OAuthCallback(String),
    /// The sign-in pipeline failed after approval.
    Callback(String),
    /// No matching provider.
    UnknownProvider,
}

impl AuthError {
    /// Returns the error code shown to the login page.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied(_) => "AccessDenied",
            Self::CredentialsSignin => "CredentialsSignin",
            Self::OAuthCallback(_) => "OAuthCallback",
            Self::Callback(_) | Self::UnknownProvider => "Callback",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::AccessDenied(reason) => {
                tracing::info!(%reason, "sign-in denied");
            }
            Self::CredentialsSignin => {
                tracing::info!("test credentials rejected");
            }
            Self::OAuthCallback(msg) => {
                tracing::warn!("OAuth callback failed: {}", msg);
            }
            Self::Callback(msg) => {
                tracing::error!("Sign-in failed: {}", msg);
            }
            Self::UnknownProvider => {
                return (StatusCode::NOT_FOUND, "no matching provider").into_response();
            }
        }

        Redirect::to(&format!("/login?error={}", self.code())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_url_accepts_relative_paths() {
        assert_eq!(safe_callback_url(Some("/")), "/");
        assert_eq!(safe_callback_url(Some("/chat/123?x=1")), "/chat/123?x=1");
    }

    #[test]
    fn callback_url_rejects_other_origins() {
        for url in [
            "https://evil.example.com",
            "//evil.example.com",
            "/\\evil.example.com",
            "/\t/evil.example.com",
            "/\n/evil.example.com",
            "/\r\n/evil.example.com",
            "/ /evil.example.com",
            "/\u{0}/evil.example.com",
            "javascript:alert(1)",
            "",
        ] {
            assert_eq!(safe_callback_url(Some(url)), "/", "{url}");
        }
        assert_eq!(safe_callback_url(None), "/");
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            AuthError::AccessDenied(DenialReason::TestProviderDisabled).code(),
            "AccessDenied"
        );
        assert_eq!(AuthError::CredentialsSignin.code(), "CredentialsSignin");
        assert_eq!(
            AuthError::OAuthCallback("x".to_string()).code(),
            "OAuthCallback"
        );
        assert_eq!(AuthError::Callback("x".to_string()).code(), "Callback");
    }

    #[test]
    fn denial_redirects_to_login() {
        let response = AuthError::AccessDenied(DenialReason::DomainNotAllowed { email: None })
            .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/login?error=AccessDenied"
        );
    }

    #[test]
    fn unknown_provider_is_not_found() {
        let response = AuthError::UnknownProvider.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
