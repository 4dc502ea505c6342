//! # Score store
//!
//! Maps an opaque user id to an integer score. A user without a row has the
//! score [`DEFAULT_SCORE`]; [`ScoreStore::get_score`] reports that value
//! instead of an error, so callers never need to distinguish "absent" from
//! "zero".
//!
//! Both writes are single `INSERT .. ON CONFLICT` statements, so
//! [`ScoreStore::ensure_user`] is idempotent under concurrent calls for the
//! same user. Concurrent [`ScoreStore::set_score`] calls are last-write-wins.
//! Storage errors are returned to the caller unchanged.

use sqlx::SqlitePool;

use crate::models::UserScore;

/// Score of a user that has no row yet.
pub const DEFAULT_SCORE: i64 = 0;

#[derive(Clone, Debug)]
pub struct ScoreStore {
    pool: SqlitePool,
}

impl ScoreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert `(user_id, 0)` unless a row already exists.
    pub async fn ensure_user(&self, user_id: &str) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO data (user_id, score) VALUES (?, ?) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(DEFAULT_SCORE)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(%user_id, "created score record");
        }
        Ok(())
    }

    /// Stored score for `user_id`, or [`DEFAULT_SCORE`] if there is no row.
    pub async fn get_score(&self, user_id: &str) -> Result<i64, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT score FROM data WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(score,)| score).unwrap_or(DEFAULT_SCORE))
    }

    /// Upsert the score for `user_id`.
    pub async fn set_score(&self, user_id: &str, score: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO data (user_id, score) VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET score = excluded.score
            "#,
        )
        .bind(user_id)
        .bind(score)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Full row for `user_id`, if one exists.
    pub async fn find(&self, user_id: &str) -> Result<Option<UserScore>, sqlx::Error> {
        sqlx::query_as("SELECT user_id, score FROM data WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{connect, migrate};

    async fn memory_store() -> ScoreStore {
        let pool = connect("sqlite::memory:").await.unwrap();
        migrate(&pool).await.unwrap();
        ScoreStore::new(pool)
    }

    #[tokio::test]
    async fn test_missing_user_scores_zero() {
        let store = memory_store().await;

        assert_eq!(store.get_score("nobody").await.unwrap(), DEFAULT_SCORE);
        assert!(store.find("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let store = memory_store().await;

        store.ensure_user("alice").await.unwrap();
        assert_eq!(
            store.find("alice").await.unwrap(),
            Some(UserScore::new("alice", 0))
        );

        store.set_score("alice", 7).await.unwrap();
        store.ensure_user("alice").await.unwrap();
        assert_eq!(store.get_score("alice").await.unwrap(), 7);

        let (rows,): (i64,) = sqlx::query_as("SELECT count(*) FROM data")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_user() {
        let store = memory_store().await;

        let (first, second) = tokio::join!(store.ensure_user("carol"), store.ensure_user("carol"));
        first.unwrap();
        second.unwrap();

        let (rows,): (i64,) = sqlx::query_as("SELECT count(*) FROM data WHERE user_id = ?")
            .bind("carol")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(store.get_score("carol").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_score_upserts() {
        let store = memory_store().await;

        // No prior ensure_user: the row is inserted.
        store.set_score("bob", 3).await.unwrap();
        assert_eq!(store.get_score("bob").await.unwrap(), 3);

        store.set_score("bob", 4).await.unwrap();
        assert_eq!(store.get_score("bob").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_scores_are_unbounded() {
        let store = memory_store().await;

        for score in [-42, 0, i64::MAX, i64::MIN] {
            store.set_score("carol", score).await.unwrap();
            assert_eq!(store.get_score("carol").await.unwrap(), score);
        }
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = memory_store().await;

        store.set_score("a", 1).await.unwrap();
        store.set_score("b", 2).await.unwrap();

        assert_eq!(store.get_score("a").await.unwrap(), 1);
        assert_eq!(store.get_score("b").await.unwrap(), 2);
    }
}
