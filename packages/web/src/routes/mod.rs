//! Route handlers.
//!
//! | Route | Method | Handler |
//! |-------|--------|---------|
//! | `/` | GET | [`root`] |
//! | `/login` | GET | [`auth::login`] |
//! | `/auth/callback` | GET | [`auth::callback`] |
//! | `/logout` | GET | [`auth::logout`] |
//! | `/counter` | GET | [`counter::counter`] |
//! | `/update_count` | POST | [`counter::update_count`] |
//! | `/get_pfp/me` | GET | [`profile::get_pfp`] |
//! | `/health` | GET | [`health`] |

use axum::response::Redirect;
use axum::Json;
use serde_json::{json, Value};

use api::Gateway;

pub mod auth;
pub mod counter;
pub mod profile;

pub async fn root() -> Redirect {
    Redirect::to("/login")
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Decrypt and validate an `auth` cookie token.
///
/// `Some(user_id)` only if the gateway accepts the cookie. Every failure,
/// including transport errors, yields `None`.
pub(crate) async fn authenticate_cookie(gateway: &dyn Gateway, token: &str) -> Option<String> {
    let claims = match gateway.decrypt_cookie(token).await {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("rejecting undecryptable auth cookie: {}", e);
            return None;
        }
    };

    match gateway
        .validate_cookie(&claims.user_id, &claims.cookie_hash)
        .await
    {
        Ok(true) => Some(claims.user_id),
        Ok(false) => {
            tracing::info!(user_id = %claims.user_id, "gateway rejected auth cookie");
            None
        }
        Err(e) => {
            tracing::warn!(user_id = %claims.user_id, "cookie validation failed: {}", e);
            None
        }
    }
}
