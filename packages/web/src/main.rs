use std::sync::Arc;

use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::BrownieGate;
use store::ScoreStore;
use web::{AppState, Settings};

/// Server sessions end after a week without requests, like the `auth` cookie.
const SESSION_INACTIVITY_DAYS: i64 = 7;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;
    tracing::debug!(?settings, "loaded settings");

    let pool = store::connect(&settings.database.url).await?;
    store::migrate(&pool).await?;

    let session_store = SqliteStore::new(pool.clone());
    session_store.migrate().await?;

    let gateway = BrownieGate::new(settings.gateway_config())?;
    tracing::info!(gateway = %gateway.config().base_url, "using BrownieGate");

    let state = AppState::new(Arc::new(gateway), ScoreStore::new(pool), settings.cookie);

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.cookie.secure)
        .with_same_site(settings.cookie.same_site.into())
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)))
        .with_signed(settings.session_key()?);

    let router = web::app(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
