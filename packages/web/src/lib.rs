//! # Web crate: the BrownieGate counter demo server
//!
//! An axum application with a gateway login flow, a cookie-bootstrapped
//! session, and one protected page that keeps a per-user score.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Layered configuration (`config.toml`, `COUNTER_*` env vars) |
//! | [`state`] | [`AppState`]: gateway, score store, cookie flags |
//! | [`routes`] | Handlers for every route |
//! | [`cookies`] | Reading and writing the `auth` cookie |
//! | [`views`] | Server-rendered pages |
//! | [`assets`] | Embedded page scripts |
//! | [`error`] | [`AppError`] and its responses |

use axum::routing::{get, post};
use axum::Router;

pub mod assets;
pub mod cookies;
pub mod error;
pub mod routes;
pub mod settings;
pub mod state;
pub mod views;

pub use error::AppError;
pub use settings::Settings;
pub use state::AppState;

/// All routes with `state` applied. Requires a `SessionManagerLayer` on top.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/login", get(routes::auth::login))
        .route("/auth/callback", get(routes::auth::callback))
        .route("/logout", get(routes::auth::logout))
        .route("/counter", get(routes::counter::counter))
        .route("/update_count", post(routes::counter::update_count))
        .route("/get_pfp/me", get(routes::profile::get_pfp))
        .route("/health", get(routes::health))
        .route("/static/js/{file}", get(assets::script))
        .with_state(state)
}
