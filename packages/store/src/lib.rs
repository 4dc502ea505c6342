//! # Store crate: persistent per-user scores
//!
//! A single SQLite table, `data(user_id, score)`, reached through [`ScoreStore`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pool`] | Opens the SQLite pool and runs the embedded migrations |
//! | [`models`] | [`UserScore`] row type |
//! | [`scores`] | [`ScoreStore`]: `ensure_user`, `get_score`, `set_score` |

pub mod models;
pub mod pool;
pub mod scores;

pub use models::UserScore;
pub use pool::{connect, migrate};
pub use scores::{ScoreStore, DEFAULT_SCORE};

pub use sqlx::SqlitePool;
