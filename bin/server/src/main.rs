#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = serve().await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

#[cfg(feature = "ssr")]
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    use axum::{Router, middleware};
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use xyz_chat_platform_access::SignInService;
    use xyz_chat_server::{
        app::App,
        auth::{self, AppState, GoogleOAuthClient, db::UserRepository},
        config::ServerConfig,
    };

    // Load configuration from environment
    let config = ServerConfig::from_env()?;
    tracing::info!(
        allowed_domain = config.auth.allowed_domain(),
        test_environment = config.auth.test_environment(),
        "Loaded configuration"
    );

    // Create database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let sign_in = SignInService::new(
        &config.auth,
        Arc::new(UserRepository::new(db_pool)),
        config.session.duration(),
    );
    let google = GoogleOAuthClient::new(&config.google, config.auth.allowed_domain())?;

    let app_state = Arc::new(AppState::new(
        sign_in,
        google,
        config.session,
        config.public,
    ));

    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let combined_state = CombinedState {
        leptos_options: leptos_options.clone(),
        app_state: app_state.clone(),
    };

    let app = Router::new()
        .merge(auth::router(app_state.clone()))
        .leptos_routes(&combined_state, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<CombinedState, _>(
            shell,
        ))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::redirect_unauthenticated,
        ))
        // Server functions read the application state from request extensions
        .layer(axum::Extension(app_state))
        .with_state(combined_state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Combined state for the application.
#[cfg(feature = "ssr")]
#[derive(Clone)]
struct CombinedState {
    leptos_options: leptos::prelude::LeptosOptions,
    app_state: std::sync::Arc<xyz_chat_server::auth::AppState>,
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<CombinedState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &CombinedState) -> Self {
        state.leptos_options.clone()
    }
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<CombinedState> for std::sync::Arc<xyz_chat_server::auth::AppState> {
    fn from_ref(state: &CombinedState) -> Self {
        state.app_state.clone()
    }
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use leptos::prelude::*;
    use leptos_meta::*;
    use xyz_chat_server::app::App;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/xyz-chat.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
