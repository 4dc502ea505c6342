//! Shared state handed to every handler.

use std::sync::Arc;

use api::Gateway;
use store::ScoreStore;

use crate::settings::CookieSettings;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub scores: ScoreStore,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, scores: ScoreStore, cookie: CookieSettings) -> Self {
        Self {
            gateway,
            scores,
            cookie,
        }
    }
}
