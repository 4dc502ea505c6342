//! Error types for gateway calls and session access.

use crate::crypto::CryptoError;

/// Failure of any [`Gateway`](crate::Gateway) operation.
///
/// Handlers treat every variant as "not authenticated".
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway configuration error: {0}")]
    Config(String),

    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("malformed gateway data: {0}")]
    Malformed(String),

    #[error("gateway rejected {operation}: HTTP {status}")]
    Rejected { operation: &'static str, status: u16 },
}

/// Failure while reading or writing session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("score store error: {0}")]
    Store(#[from] sqlx::Error),
}
