//! The protected counter page and its score updates.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::Value;
use tower_sessions::Session;

use api::UserSession;

use super::authenticate_cookie;
use crate::cookies::{read_auth_cookie, removal_cookie};
use crate::error::{AppError, StatusBody};
use crate::state::AppState;
use crate::views;

/// Shown when the gateway has no username for the user.
const ANONYMOUS_NAME: &str = "player";

fn back_to_login(drop_cookie: bool) -> Response {
    if drop_cookie {
        (
            AppendHeaders([(SET_COOKIE, removal_cookie())]),
            Redirect::to("/login"),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

pub async fn counter(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = UserSession::new(session);

    let user_id = match session.user_id().await? {
        Some(user_id) => user_id,
        None => {
            let Some(token) = read_auth_cookie(&headers) else {
                return Ok(back_to_login(false));
            };
            let Some(user_id) = authenticate_cookie(state.gateway.as_ref(), &token).await else {
                return Ok(back_to_login(true));
            };
            if !session
                .bootstrap_from_gateway(state.gateway.as_ref(), &user_id)
                .await
            {
                return Ok(back_to_login(false));
            }
            user_id
        }
    };

    let score = session.ensure_score_loaded(&state.scores, &user_id).await?;
    let username = session
        .username()
        .await?
        .unwrap_or_else(|| ANONYMOUS_NAME.to_string());

    Ok(Html(views::counter_page(&username, score)).into_response())
}

/// Coerce a JSON `score` value to an integer.
///
/// Accepts integers, floats without a fractional part, and strings holding a
/// base-10 integer.
fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
            (float.fract() == 0.0 && in_range).then_some(float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Score from an `/update_count` body. A missing or null `score` is 0.
fn parse_score(body: &[u8]) -> Result<i64, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(AppError::BadRequest("expected a JSON object".to_string()));
    };

    match fields.get("score") {
        None | Some(Value::Null) => Ok(store::DEFAULT_SCORE),
        Some(score) => coerce_score(score)
            .ok_or_else(|| AppError::BadRequest("score must be an integer".to_string())),
    }
}

pub async fn update_count(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<StatusBody>, AppError> {
    let session = UserSession::new(session);
    let Some(user_id) = session.user_id().await? else {
        return Err(AppError::Unauthorized("not authenticated".to_string()));
    };

    let score = parse_score(&body)?;

    session.set_score(score).await?;
    state.scores.set_score(&user_id, score).await?;
    tracing::debug!(%user_id, score, "score updated");

    Ok(Json(StatusBody::success(score)))
}
