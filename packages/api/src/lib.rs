//! # API crate: BrownieGate integration and per-request sessions
//!
//! Everything the web handlers need to talk to the authentication gateway and
//! to keep the short-lived server-side session in step with the browser's
//! `auth` cookie.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | - | The [`Gateway`] capability, its HTTP client [`BrownieGate`], gateway configuration, and [`UserSession`] |
//! | [`crypto`] | - | AES-256-GCM sealing of payloads and cookie tokens under the project encryption key |
//! | [`error`] | - | [`GatewayError`] and [`SessionError`] |
//! | `auth::mock` | `mock` | [`auth::MockGateway`], an in-memory gateway for tests |

pub mod auth;
pub mod crypto;
pub mod error;

pub use auth::{
    BrownieGate, CookieClaims, Gateway, GatewayConfig, UserData, UserSession,
    SESSION_SCORE_KEY, SESSION_USERNAME_KEY, SESSION_USER_ID_KEY,
};
pub use error::{GatewayError, SessionError};
