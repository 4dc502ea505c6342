//! # The gateway capability
//!
//! [`Gateway`] is the whole surface this application uses from BrownieGate.
//! Handlers only ever hold an `Arc<dyn Gateway>`, so tests swap in an
//! in-memory implementation and production uses [`BrownieGate`](super::BrownieGate).
//!
//! Every operation can fail with a [`GatewayError`]. Callers treat any failure
//! as "not authenticated" and never surface it as a server error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Profile data returned by the gateway for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub username: Option<String>,
    /// Any other profile fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserData {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Contents of an `auth` cookie token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieClaims {
    pub user_id: String,
    pub cookie_hash: String,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Login URL for this project.
    fn auth_url(&self) -> String;

    /// `Ok(None)` when the gateway reports no such user.
    async fn get_user_data(&self, user_id: &str) -> Result<Option<UserData>, GatewayError>;

    /// Open an encrypted login payload into its inner text.
    async fn decrypt_payload(&self, payload: &str) -> Result<String, GatewayError>;

    /// `Ok(Some(user_id))` if the gateway vouches for the payload, `Ok(None)` if not.
    async fn verify_payload(&self, decrypted: &str) -> Result<Option<String>, GatewayError>;

    /// Issue a fresh cookie token for `user_id`.
    async fn generate_cookie(&self, user_id: &str) -> Result<String, GatewayError>;

    async fn decrypt_cookie(&self, token: &str) -> Result<CookieClaims, GatewayError>;

    async fn validate_cookie(&self, user_id: &str, cookie_hash: &str)
        -> Result<bool, GatewayError>;

    /// Forget the server-side cookie record for `user_id`.
    async fn remove_cookie(&self, user_id: &str) -> Result<(), GatewayError>;

    /// Profile picture (URL or data URI), if the user has one.
    async fn get_pfp(&self, user_id: &str) -> Result<Option<String>, GatewayError>;
}
