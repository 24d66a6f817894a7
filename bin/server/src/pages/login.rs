//! Login page component.

use crate::types::LoginOptions;
use crate::user::get_login_options;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Message shown when a sign-in attempt bounced back with an error.
fn access_denied_message(allowed_domain: &str) -> String {
    format!("Access denied. Only @{allowed_domain} accounts are allowed.")
}

/// Login page with Google sign-in and, in test mode, the test sign-in.
#[component]
pub fn LoginPage() -> impl IntoView {
    let options = Resource::new(|| (), |_| get_login_options());
    let query = use_query_map();
    let has_error = query.with_untracked(|q| q.get("error").is_some());

    view! {
        <div class="login-page">
            <Suspense fallback=|| view! { <LoginFallback/> }>
                {move || {
                    options.get().map(|result| match result {
                        Ok(options) => view! {
                            <LoginBox options=options has_error=has_error/>
                        }.into_any(),
                        Err(_) => view! {
                            <div class="login-box">
                                <p class="error">"Sign-in is unavailable. Please try again."</p>
                            </div>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Shown while the login options load.
#[component]
fn LoginFallback() -> impl IntoView {
    view! {
        <div class="login-box">
            <h1>"Sign In"</h1>
            <button type="button" class="login-button" disabled=true>
                "Continue with Google"
            </button>
        </div>
    }
}

#[component]
fn LoginBox(options: LoginOptions, has_error: bool) -> impl IntoView {
    let (toast, set_toast) =
        signal(has_error.then(|| access_denied_message(&options.allowed_domain)));
    let (loading, set_loading) = signal(false);

    let subtitle = format!("Sign in with your @{} Google account", options.allowed_domain);
    let test_email = options.test_email;

    view! {
        {move || toast.get().map(|message| view! {
            <div class="toast toast-error" role="alert">
                <span>{message}</span>
                <button
                    type="button"
                    class="toast-dismiss"
                    aria-label="Dismiss"
                    on:click=move |_| set_toast.set(None)
                >"×"</button>
            </div>
        })}

        <div class="login-box">
            <h1>"Sign In"</h1>
            <p class="login-subtitle">{subtitle}</p>

            <form
                method="get"
                action="/auth/signin/google"
                on:submit=move |_| set_loading.set(true)
            >
                <input type="hidden" name="callback_url" value="/"/>
                <button type="submit" class="login-button" disabled=move || loading.get()>
                    {move || if loading.get() { "Signing in..." } else { "Continue with Google" }}
                </button>
            </form>

            {options.test_mode.then(|| view! {
                <form
                    method="post"
                    action="/auth/callback/playwright"
                    class="test-login"
                    on:submit=move |_| set_loading.set(true)
                >
                    <input type="hidden" name="email" value=test_email/>
                    <button
                        type="submit"
                        class="login-button secondary"
                        data-testid="playwright-login"
                        disabled=move || loading.get()
                    >
                        "Sign in with Playwright (Test)"
                    </button>
                </form>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(test_mode: bool) -> LoginOptions {
        LoginOptions {
            allowed_domain: "xyz.vc".to_string(),
            test_mode,
            test_email: "test@playwright.com".to_string(),
        }
    }

    #[test]
    fn denied_message_names_domain() {
        assert_eq!(
            access_denied_message("xyz.vc"),
            "Access denied. Only @xyz.vc accounts are allowed."
        );
    }

    #[test]
    fn google_sign_in_is_a_button() {
        let html = Owner::new().with(|| {
            view! { <LoginBox options=options(false) has_error=false/> }.to_html()
        });

        assert!(html.contains("Sign In"), "{html}");
        assert!(html.contains("Sign in with your @xyz.vc Google account"), "{html}");
        assert!(html.contains(r#"action="/auth/signin/google""#), "{html}");
        assert!(html.contains(r#"name="callback_url""#), "{html}");
        assert!(html.contains(r#"<button type="submit" class="login-button""#), "{html}");
        assert!(html.contains("Continue with Google"), "{html}");
        assert!(!html.contains("playwright-login"), "{html}");
        assert!(!html.contains("Access denied"), "{html}");
    }

    #[test]
    fn test_mode_posts_configured_email() {
        let html = Owner::new().with(|| {
            view! { <LoginBox options=options(true) has_error=true/> }.to_html()
        });

        assert!(html.contains(r#"data-testid="playwright-login""#), "{html}");
        assert!(html.contains(r#"value="test@playwright.com""#), "{html}");
        assert!(html.contains(r#"action="/auth/callback/playwright""#), "{html}");
        assert!(
            html.contains("Access denied. Only @xyz.vc accounts are allowed."),
            "{html}"
        );
    }

    #[test]
    fn fallback_shows_disabled_google_button() {
        let html = Owner::new().with(|| view! { <LoginFallback/> }.to_html());

        assert!(html.contains("Continue with Google"), "{html}");
        assert!(html.contains("disabled"), "{html}");
        assert!(!html.contains("Loading"), "{html}");
    }
}
