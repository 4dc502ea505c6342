//! # BrownieGate HTTP client
//!
//! The production [`Gateway`]. Two kinds of operation:
//!
//! - **Local**: [`decrypt_payload`](Gateway::decrypt_payload) and
//!   [`decrypt_cookie`](Gateway::decrypt_cookie) open sealed blobs with the
//!   project encryption key (see [`crate::crypto`]); no network involved.
//! - **Remote**: everything else is a JSON `POST {base_url}/api/<operation>`
//!   whose body always carries `project_uuid` and `api_key`:
//!
//! | Operation | Extra request fields | Response |
//! |-----------|---------------------|----------|
//! | `verify_payload` | `payload` | `{success, user_id?}` |
//! | `get_user_data` | `user_id` | `{success, data?}` |
//! | `generate_cookie` | `user_id` | `{cookie_hash}` |
//! | `validate_cookie` | `user_id`, `cookie_hash` | `{valid}` |
//! | `remove_cookie` | `user_id` | any 2xx |
//! | `get_pfp` | `user_id` | `{pfp?}` |
//!
//! [`generate_cookie`](Gateway::generate_cookie) combines both: the gateway
//! hands out a cookie hash and the client seals `{user_id, cookie_hash}` into
//! the token stored in the browser.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::config::GatewayConfig;
use super::gateway::{CookieClaims, Gateway, UserData};
use crate::crypto::SealingKey;
use crate::error::GatewayError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDataResponse {
    success: bool,
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct CookieHashResponse {
    cookie_hash: String,
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: bool,
}

#[derive(Debug, Deserialize)]
struct PfpResponse {
    pfp: Option<String>,
}

pub struct BrownieGate {
    config: GatewayConfig,
    auth_url: String,
    key: SealingKey,
    http: Client,
}

impl BrownieGate {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let auth_url = config.auth_url()?;
        let key = SealingKey::from_hex(&config.encryption_key)?;
        let http = reqwest::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            config,
            auth_url,
            key,
            http,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Add the project credentials to `fields` and POST them.
    async fn send(
        &self,
        operation: &'static str,
        fields: Value,
    ) -> Result<reqwest::Response, GatewayError> {
        let mut body = json!({
            "project_uuid": self.config.project_uuid,
            "api_key": self.config.api_key,
        });
        if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), fields) {
            body.extend(fields);
        }

        let response = self
            .http
            .post(self.config.endpoint(operation))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(operation, %status, "gateway returned an error status");
            return Err(GatewayError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        fields: Value,
    ) -> Result<T, GatewayError> {
        Ok(self.send(operation, fields).await?.json().await?)
    }

    fn seal_claims(&self, claims: &CookieClaims) -> Result<String, GatewayError> {
        let plaintext =
            serde_json::to_vec(claims).map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(self.key.seal(&plaintext)?)
    }
}

#[async_trait]
impl Gateway for BrownieGate {
    fn auth_url(&self) -> String {
        self.auth_url.clone()
    }

    async fn get_user_data(&self, user_id: &str) -> Result<Option<UserData>, GatewayError> {
        let response: UserDataResponse = self
            .call("get_user_data", json!({ "user_id": user_id }))
            .await?;

        Ok(if response.success {
            Some(response.data.unwrap_or_default())
        } else {
            None
        })
    }

    async fn decrypt_payload(&self, payload: &str) -> Result<String, GatewayError> {
        let plaintext = self.key.open(payload)?;
        String::from_utf8(plaintext).map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    async fn verify_payload(&self, decrypted: &str) -> Result<Option<String>, GatewayError> {
        let response: VerifyResponse = self
            .call("verify_payload", json!({ "payload": decrypted }))
            .await?;

        match response {
            VerifyResponse {
                success: true,
                user_id: Some(user_id),
            } => Ok(Some(user_id)),
            VerifyResponse { success: true, .. } => Err(GatewayError::Malformed(
                "verified payload without a user id".to_string(),
            )),
            _ => Ok(None),
        }
    }

    async fn generate_cookie(&self, user_id: &str) -> Result<String, GatewayError> {
        let response: CookieHashResponse = self
            .call("generate_cookie", json!({ "user_id": user_id }))
            .await?;

        self.seal_claims(&CookieClaims {
            user_id: user_id.to_string(),
            cookie_hash: response.cookie_hash,
        })
    }

    async fn decrypt_cookie(&self, token: &str) -> Result<CookieClaims, GatewayError> {
        let plaintext = self.key.open(token)?;
        serde_json::from_slice(&plaintext).map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    async fn validate_cookie(
        &self,
        user_id: &str,
        cookie_hash: &str,
    ) -> Result<bool, GatewayError> {
        let response: ValidateResponse = self
            .call(
                "validate_cookie",
                json!({ "user_id": user_id, "cookie_hash": cookie_hash }),
            )
            .await?;
        Ok(response.valid)
    }

    async fn remove_cookie(&self, user_id: &str) -> Result<(), GatewayError> {
        self.send("remove_cookie", json!({ "user_id": user_id }))
            .await?;
        Ok(())
    }

    async fn get_pfp(&self, user_id: &str) -> Result<Option<String>, GatewayError> {
        let response: PfpResponse = self.call("get_pfp", json!({ "user_id": user_id })).await?;
        Ok(response.pfp.filter(|pfp| !pfp.is_empty()))
    }
}
