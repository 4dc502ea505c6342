//! In-memory [`Gateway`] for tests.
//!
//! Tokens are plain text so tests can forge them:
//! payloads are `sealed:<user_id>`, cookie tokens are `<user_id>:<cookie_hash>`.
//! A payload verifies only for users registered with [`MockGateway::with_user`]
//! or [`MockGateway::with_account`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::gateway::{CookieClaims, Gateway, UserData};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct MockState {
    users: HashMap<String, UserData>,
    accounts: HashSet<String>,
    pfps: HashMap<String, String>,
    cookies: HashMap<String, String>,
    issued: u64,
    offline: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user_id: &str, username: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user_id.to_string(), UserData::with_username(username));
        self
    }

    /// A user the gateway vouches for but has no profile data for.
    pub fn with_account(self, user_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(user_id.to_string());
        self
    }

    pub fn with_pfp(self, user_id: &str, pfp: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .pfps
            .insert(user_id.to_string(), pfp.to_string());
        self
    }

    /// While offline every remote operation fails with HTTP 503.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Login payload as the gateway would hand it over for `user_id`.
    pub fn payload_for(user_id: &str) -> String {
        format!("sealed:{user_id}")
    }

    /// Register and return a valid cookie token, as after a login.
    pub fn issue_cookie(&self, user_id: &str) -> String {
        let mut state = self.state.lock().unwrap();
        state.issued += 1;
        let hash = format!("hash-{}", state.issued);
        state.cookies.insert(user_id.to_string(), hash.clone());
        format!("{user_id}:{hash}")
    }

    pub fn has_cookie(&self, user_id: &str) -> bool {
        self.state.lock().unwrap().cookies.contains_key(user_id)
    }

    fn remote(&self, operation: &'static str) -> Result<(), GatewayError> {
        if self.state.lock().unwrap().offline {
            return Err(GatewayError::Rejected {
                operation,
                status: 503,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn auth_url(&self) -> String {
        "http://gate.test/gate/auth?project_uuid=test-project".to_string()
    }

    async fn get_user_data(&self, user_id: &str) -> Result<Option<UserData>, GatewayError> {
        self.remote("get_user_data")?;
        Ok(self.state.lock().unwrap().users.get(user_id).cloned())
    }

    async fn decrypt_payload(&self, payload: &str) -> Result<String, GatewayError> {
        payload
            .strip_prefix("sealed:")
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Malformed("payload is not sealed".to_string()))
    }

    async fn verify_payload(&self, decrypted: &str) -> Result<Option<String>, GatewayError> {
        self.remote("verify_payload")?;
        let state = self.state.lock().unwrap();
        let known = state.users.contains_key(decrypted) || state.accounts.contains(decrypted);
        Ok(known.then(|| decrypted.to_string()))
    }

    async fn generate_cookie(&self, user_id: &str) -> Result<String, GatewayError> {
        self.remote("generate_cookie")?;
        Ok(self.issue_cookie(user_id))
    }

    async fn decrypt_cookie(&self, token: &str) -> Result<CookieClaims, GatewayError> {
        let (user_id, cookie_hash) = token
            .split_once(':')
            .ok_or_else(|| GatewayError::Malformed("cookie is not sealed".to_string()))?;
        Ok(CookieClaims {
            user_id: user_id.to_string(),
            cookie_hash: cookie_hash.to_string(),
        })
    }

    async fn validate_cookie(
        &self,
        user_id: &str,
        cookie_hash: &str,
    ) -> Result<bool, GatewayError> {
        self.remote("validate_cookie")?;
        let state = self.state.lock().unwrap();
        Ok(state.cookies.get(user_id).map(String::as_str) == Some(cookie_hash))
    }

    async fn remove_cookie(&self, user_id: &str) -> Result<(), GatewayError> {
        self.remote("remove_cookie")?;
        self.state.lock().unwrap().cookies.remove(user_id);
        Ok(())
    }

    async fn get_pfp(&self, user_id: &str) -> Result<Option<String>, GatewayError> {
        self.remote("get_pfp")?;
        Ok(self.state.lock().unwrap().pfps.get(user_id).cloned())
    }
}
