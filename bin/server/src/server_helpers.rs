//! Helper functions for server functions with proper error handling and logging.

use crate::auth::{AppState, middleware};
use crate::error::SessionError;
use axum::Extension;
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use xyz_chat_platform_access::AuthenticatedUser;

/// Gets the application state from the request extensions.
pub async fn get_app_state() -> Result<Arc<AppState>, SessionError> {
    let Extension(state): Extension<Arc<AppState>> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "Application state missing from request");
            SessionError::StateUnavailable {
                details: e.to_string(),
            }
        })?;
    Ok(state)
}

/// Extracts and verifies the current session from the request cookie.
///
/// Logs structured errors for debugging while returning user-safe error types.
pub async fn get_authenticated_user() -> Result<AuthenticatedUser, SessionError> {
    let state = get_app_state().await?;

    let jar: CookieJar = leptos_axum::extract().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to extract cookie jar");
        SessionError::NotAuthenticated
    })?;

    middleware::authenticate(&state, &jar).map_err(|_| SessionError::NotAuthenticated)
}
