//! Application settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml`, then `COUNTER_*` environment variables (`__` separates
//! sections, e.g. `COUNTER_GATEWAY__API_KEY`). `creds.env` and `.env` are
//! loaded into the environment first when present.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tower_sessions::cookie::{Key, SameSite};

use api::GatewayConfig;

/// Minimum length of `session.secret_key` in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: String,
}

#[derive(Clone, Deserialize)]
pub struct Gateway {
    pub url: String,
    pub project_uuid: String,
    pub api_key: String,
    pub encryption_key: String,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("url", &self.url)
            .field("project_uuid", &self.project_uuid)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Deserialize)]
pub struct Session {
    pub secret_key: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl From<SameSitePolicy> for SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

/// Flags for the `auth` cookie and the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: false,
            same_site: SameSitePolicy::Lax,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub gateway: Gateway,
    pub session: Session,
    pub cookie: CookieSettings,
}

impl Settings {
    /// Load from `config.toml` and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::from_filename("creds.env").ok();
        dotenvy::dotenv().ok();

        let config = Self::defaults()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Self::environment())
            .build()?;

        config.try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("COUNTER")
            .prefix_separator("_")
            .separator("__")
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://data.db?mode=rwc")?
            .set_default("gateway.url", "http://localhost:5000")?
            .set_default("cookie.secure", false)?
            .set_default("cookie.same_site", "lax")
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(
            self.gateway.api_key.clone(),
            self.gateway.project_uuid.clone(),
            self.gateway.encryption_key.clone(),
            self.gateway.url.clone(),
        )
    }

    /// Signing key for the session cookie.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        let secret = self.session.secret_key.as_bytes();
        if secret.len() < SESSION_KEY_MIN_LEN {
            return Err(ConfigError::Message(format!(
                "session.secret_key must be at least {} bytes, got {}",
                SESSION_KEY_MIN_LEN,
                secret.len()
            )));
        }
        Key::try_from(secret).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
