//! Handler errors and their HTTP responses.
//!
//! Only malformed requests and missing authentication reach the user as
//! errors. Gateway failures never get here: handlers degrade them to
//! "logged out" themselves. Session and storage failures are fatal to the
//! request and answer 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use api::SessionError;

/// JSON body of `/update_count` responses and of JSON errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusBody {
    pub fn success(score: i64) -> Self {
        Self {
            status: "success",
            score: Some(score),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            score: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("score store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Session(_) | AppError::Store(_) => {
                tracing::error!("request failed: {}", self);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(StatusBody::error("internal server error")),
                )
                    .into_response();
            }
        };
        (status, Json(StatusBody::error(self.to_string()))).into_response()
    }
}
