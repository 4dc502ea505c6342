use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `data` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserScore {
    pub user_id: String,
    pub score: i64,
}

impl UserScore {
    pub fn new(user_id: impl Into<String>, score: i64) -> Self {
        Self {
            user_id: user_id.into(),
            score,
        }
    }
}
