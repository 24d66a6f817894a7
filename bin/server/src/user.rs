//! User-related server functions for identity and session display.

use crate::types::{LoginOptions, SessionView};
use leptos::prelude::*;

/// Server function to get the signed-in user's session.
#[server]
pub async fn get_current_session() -> Result<Option<SessionView>, ServerFnError> {
    use crate::error::SessionError;
    use crate::server_helpers::get_authenticated_user;

    let user = match get_authenticated_user().await {
        Ok(user) => user,
        Err(SessionError::NotAuthenticated) => return Ok(None),
        Err(e) => return Err(e.into_server_error()),
    };

    let session = user.session();
    Ok(Some(SessionView {
        user_id: session.user.id.to_string(),
        user_type: session.user.user_type.to_string(),
        email: session.user.email.clone(),
        name: session.user.name.clone(),
        max_messages_per_day: session.user.user_type.entitlements().max_messages_per_day,
    }))
}

/// Server function to get the login page options.
#[server]
pub async fn get_login_options() -> Result<LoginOptions, ServerFnError> {
    use crate::server_helpers::get_app_state;

    let state = get_app_state().await.map_err(|e| e.into_server_error())?;

    Ok(login_options(
        state.sign_in.allowed_domain(),
        state.public.test_mode,
    ))
}

#[cfg(feature = "ssr")]
fn login_options(allowed_domain: &str, test_mode: bool) -> LoginOptions {
    LoginOptions {
        allowed_domain: allowed_domain.to_string(),
        test_mode,
        test_email: xyz_chat_platform_access::TEST_USER_EMAIL.to_string(),
    }
}
