//! Authentication through the BrownieGate gateway.

mod brownie;
mod config;
mod gateway;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod session;

pub use brownie::BrownieGate;
pub use config::GatewayConfig;
pub use gateway::{CookieClaims, Gateway, UserData};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGateway;
pub use session::{UserSession, SESSION_SCORE_KEY, SESSION_USERNAME_KEY, SESSION_USER_ID_KEY};
