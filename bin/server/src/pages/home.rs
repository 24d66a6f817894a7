//! Home page component.

use crate::components::MultimodalInput;
use crate::user::get_current_session;
use leptos::prelude::*;

/// The signed-in root page.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_current_session());

    view! {
        <div class="home-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    session.get().map(|result| match result {
                        Ok(Some(session)) => {
                            let who = session
                                .email
                                .clone()
                                .or_else(|| session.name.clone())
                                .unwrap_or_else(|| "Signed in".to_string());
                            view! {
                                <header class="session-bar">
                                    <span class="session-email">{who}</span>
                                    <span class="session-allowance">
                                        {format!("{} messages per day", session.max_messages_per_day)}
                                    </span>
                                    <a href="/auth/signout" rel="external" class="signout-link">"Sign out"</a>
                                </header>
                            }.into_any()
                        }
                        Ok(None) => view! {
                            <header class="session-bar">
                                <a href="/login" rel="external" class="signin-link">"Sign in"</a>
                            </header>
                        }.into_any(),
                        Err(_) => view! {
                            <p class="error">"Failed to load session. Please try again."</p>
                        }.into_any(),
                    })
                }}
            </Suspense>
            <MultimodalInput/>
        </div>
    }
}
