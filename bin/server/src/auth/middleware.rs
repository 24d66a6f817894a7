//! Authentication middleware and extractors for Axum.
//!
//! Sessions are projected from the signed cookie token on every request;
//! nothing here touches the user store.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use xyz_chat_platform_access::AuthenticatedUser;

use super::{AppState, SESSION_COOKIE};

/// Extractor for requiring an authenticated user.
///
/// If the user is not authenticated, they will be redirected to the login page.
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        authenticate(&app_state, &jar).map(RequireAuth)
    }
}

/// Extractor for optionally getting the authenticated user.
///
/// Returns None if the user is not authenticated.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Verifies the session cookie in `jar`.
pub fn authenticate(
    state: &AppState,
    jar: &CookieJar,
) -> Result<AuthenticatedUser, AuthRejection> {
    let session_cookie = jar
        .get(SESSION_COOKIE)
        .ok_or(AuthRejection::NotAuthenticated)?;

    state
        .sign_in
        .authenticate(session_cookie.value())
        .map_err(|report| {
            tracing::debug!(error = %report, "rejected session token");
            AuthRejection::NotAuthenticated
        })
}

/// Redirects page requests without a valid session to the login page.
///
/// Requests for the login page, auth routes, static assets, server
/// functions and the liveness probe pass through.
pub async fn redirect_unauthenticated(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) || authenticate(&state, &jar).is_ok() {
        return next.run(request).await;
    }

    Redirect::to("/login").into_response()
}

fn is_public_path(path: &str) -> bool {
    path == "/login"
        || path == "/ping"
        || ["/auth/", "/pkg/", "/api/"]
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    /// Missing, invalid or expired session token.
    NotAuthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => Redirect::to("/login").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths() {
        for path in [
            "/login",
            "/ping",
            "/auth/signin/google",
            "/auth/callback/playwright",
            "/pkg/xyz-chat.js",
            "/api/get_current_session",
        ] {
            assert!(is_public_path(path), "{path}");
        }
    }

    #[test]
    fn protected_paths() {
        for path in ["/", "/chat/123", "/login/other", "/authx", "/pinger"] {
            assert!(!is_public_path(path), "{path}");
        }
    }
}
