use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tower_sessions::Session;

use api::UserSession;

use crate::error::AppError;
use crate::state::AppState;

/// Profile picture of the logged-in user. A gateway failure means "no picture".
pub async fn get_pfp(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session = UserSession::new(session);
    let Some(user_id) = session.user_id().await? else {
        return Ok((StatusCode::UNAUTHORIZED, Json(json!({ "success": false }))));
    };

    let pfp = state.gateway.get_pfp(&user_id).await.unwrap_or_else(|e| {
        tracing::warn!(%user_id, "failed to fetch profile picture: {}", e);
        None
    });

    Ok((StatusCode::OK, Json(json!({ "success": true, "pfp": pfp }))))
}
