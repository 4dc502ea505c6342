//! Login, gateway callback and logout.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;

use api::UserSession;

use super::authenticate_cookie;
use crate::cookies::{auth_cookie, read_auth_cookie, removal_cookie};
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

fn login_page(state: &AppState) -> Html<String> {
    Html(views::login_page(&state.gateway.auth_url()))
}

/// Login page, or straight to `/counter` if the session or a valid `auth`
/// cookie already identifies the user.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = UserSession::new(session);
    if session.user_id().await?.is_some() {
        return Ok(Redirect::to("/counter").into_response());
    }

    let Some(token) = read_auth_cookie(&headers) else {
        return Ok(login_page(&state).into_response());
    };

    if let Some(user_id) = authenticate_cookie(state.gateway.as_ref(), &token).await {
        if session
            .bootstrap_from_gateway(state.gateway.as_ref(), &user_id)
            .await
        {
            return Ok(Redirect::to("/counter").into_response());
        }
    }

    Ok((
        AppendHeaders([(SET_COOKIE, removal_cookie())]),
        login_page(&state),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub payload: Option<String>,
}

/// Where the gateway sends the browser after authentication.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    let Some(payload) = params.payload.filter(|payload| !payload.is_empty()) else {
        return Ok((StatusCode::BAD_REQUEST, "missing payload").into_response());
    };

    let decrypted = match state.gateway.decrypt_payload(&payload).await {
        Ok(decrypted) => decrypted,
        Err(e) => {
            tracing::warn!("failed to decrypt login payload: {}", e);
            return Ok((StatusCode::BAD_REQUEST, e.to_string()).into_response());
        }
    };

    let user_id = match state.gateway.verify_payload(&decrypted).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            tracing::warn!("gateway rejected login payload");
            return Ok((StatusCode::UNAUTHORIZED, "payload verification failed").into_response());
        }
        Err(e) => {
            tracing::warn!("failed to verify login payload: {}", e);
            return Ok((StatusCode::BAD_REQUEST, e.to_string()).into_response());
        }
    };

    let token = match state.gateway.generate_cookie(&user_id).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(%user_id, "failed to generate auth cookie: {}", e);
            return Ok((StatusCode::BAD_REQUEST, e.to_string()).into_response());
        }
    };

    state.scores.ensure_user(&user_id).await?;

    let session = UserSession::new(session);
    if !session
        .bootstrap_from_gateway(state.gateway.as_ref(), &user_id)
        .await
    {
        tracing::warn!(%user_id, "logged in but session bootstrap failed");
    }

    tracing::info!(%user_id, "user logged in");
    Ok((
        AppendHeaders([(SET_COOKIE, auth_cookie(token, &state.cookie))]),
        Html(views::callback_page()),
    )
        .into_response())
}

/// Forget the user everywhere and go back to the login page.
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let session = UserSession::new(session);

    if let Some(user_id) = session.user_id().await? {
        if let Err(e) = state.gateway.remove_cookie(&user_id).await {
            tracing::warn!(%user_id, "failed to remove gateway cookie: {}", e);
        }
        tracing::info!(%user_id, "user logged out");
    }

    session.clear().await?;

    Ok((
        AppendHeaders([(SET_COOKIE, removal_cookie())]),
        Redirect::to("/login"),
    )
        .into_response())
}
