//! # Per-request session state
//!
//! [`UserSession`] wraps the `tower_sessions::Session` extracted by a handler
//! and owns the three keys this application keeps server-side:
//!
//! | Key | Type | Set by |
//! |-----|------|--------|
//! | [`SESSION_USER_ID_KEY`] | `String` | [`UserSession::bootstrap_from_gateway`] |
//! | [`SESSION_USERNAME_KEY`] | `String` | [`UserSession::bootstrap_from_gateway`] |
//! | [`SESSION_SCORE_KEY`] | `i64` | [`UserSession::load_score_into_session`], [`UserSession::set_score`] |
//!
//! A session is *authenticated* exactly when it holds a user id. It becomes
//! authenticated through a successful bootstrap and anonymous again through
//! [`UserSession::clear`].

use store::ScoreStore;
use tower_sessions::Session;

use super::gateway::Gateway;
use crate::error::SessionError;

pub const SESSION_USER_ID_KEY: &str = "user_id";
pub const SESSION_USERNAME_KEY: &str = "username";
pub const SESSION_SCORE_KEY: &str = "score";

/// Snapshot of everything stored in the session.
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq)]
struct SessionData {
    user_id: Option<String>,
    username: Option<String>,
    score: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct UserSession {
    session: Session,
}

impl UserSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub async fn user_id(&self) -> Result<Option<String>, SessionError> {
        Ok(self.session.get(SESSION_USER_ID_KEY).await?)
    }

    pub async fn username(&self) -> Result<Option<String>, SessionError> {
        Ok(self.session.get(SESSION_USERNAME_KEY).await?)
    }

    pub async fn score(&self) -> Result<Option<i64>, SessionError> {
        Ok(self.session.get(SESSION_SCORE_KEY).await?)
    }

    #[cfg(test)]
    async fn data(&self) -> Result<SessionData, SessionError> {
        Ok(SessionData {
            user_id: self.user_id().await?,
            username: self.username().await?,
            score: self.score().await?,
        })
    }

    /// Fetch the user's profile from the gateway and mark the session as
    /// authenticated for `user_id`.
    ///
    /// Returns `false`, leaving the session untouched, if the gateway fails or
    /// does not know the user. Never returns an error.
    pub async fn bootstrap_from_gateway(&self, gateway: &dyn Gateway, user_id: &str) -> bool {
        let data = match gateway.get_user_data(user_id).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::warn!(%user_id, "gateway has no user data");
                return false;
            }
            Err(e) => {
                tracing::warn!(%user_id, "failed to fetch user data: {}", e);
                return false;
            }
        };

        match self.authenticate(user_id, data.username).await {
            Ok(()) => {
                tracing::debug!(%user_id, "session bootstrapped");
                true
            }
            Err(e) => {
                tracing::error!(%user_id, "failed to write session: {}", e);
                false
            }
        }
    }

    async fn authenticate(
        &self,
        user_id: &str,
        username: Option<String>,
    ) -> Result<(), SessionError> {
        let previous = self.user_id().await?;
        if previous.as_deref() != Some(user_id) {
            // A cached score belongs to whoever was logged in before.
            self.session.remove::<i64>(SESSION_SCORE_KEY).await?;
        }

        self.session
            .insert(SESSION_USER_ID_KEY, user_id.to_string())
            .await?;
        match username {
            Some(username) => self.session.insert(SESSION_USERNAME_KEY, username).await?,
            None => {
                self.session.remove::<String>(SESSION_USERNAME_KEY).await?;
            }
        }
        Ok(())
    }

    /// Read the persisted score (0 if there is none) and cache it.
    pub async fn load_score_into_session(
        &self,
        store: &ScoreStore,
        user_id: &str,
    ) -> Result<i64, SessionError> {
        let score = store.get_score(user_id).await?;
        self.set_score(score).await?;
        Ok(score)
    }

    /// The cached score, loading it first if nothing is cached.
    pub async fn ensure_score_loaded(
        &self,
        store: &ScoreStore,
        user_id: &str,
    ) -> Result<i64, SessionError> {
        match self.score().await? {
            Some(score) => Ok(score),
            None => self.load_score_into_session(store, user_id).await,
        }
    }

    pub async fn set_score(&self, score: i64) -> Result<(), SessionError> {
        self.session.insert(SESSION_SCORE_KEY, score).await?;
        Ok(())
    }

    /// Drop all session state and the server-side record.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.session.flush().await?;
        Ok(())
    }
}
