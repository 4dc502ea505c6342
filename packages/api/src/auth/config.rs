//! Gateway connection settings.

use reqwest::Url;

use crate::error::GatewayError;

/// Everything needed to construct a [`BrownieGate`](super::BrownieGate).
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub project_uuid: String,
    /// 64 hex chars, shared with the gateway.
    pub encryption_key: String,
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(
        api_key: impl Into<String>,
        project_uuid: impl Into<String>,
        encryption_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            project_uuid: project_uuid.into(),
            encryption_key: encryption_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Where the login page sends the browser to authenticate.
    pub fn auth_url(&self) -> Result<String, GatewayError> {
        let url = Url::parse_with_params(
            &format!("{}/gate/auth", self.base_url),
            [("project_uuid", self.project_uuid.as_str())],
        )
        .map_err(|e| GatewayError::Config(format!("invalid gateway url: {}", e)))?;
        Ok(url.into())
    }

    /// Fails if a credential is blank or the base URL does not parse.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::Config("api_key is empty".to_string()));
        }
        if self.project_uuid.trim().is_empty() {
            return Err(GatewayError::Config("project_uuid is empty".to_string()));
        }
        self.auth_url().map(|_| ())
    }

    /// `{base_url}/api/{operation}`
    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/api/{}", self.base_url, operation)
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("project_uuid", &self.project_uuid)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = GatewayConfig::new("key", "proj-1", "00", "http://gate.local:5000/");

        assert_eq!(config.base_url, "http://gate.local:5000");
        assert_eq!(
            config.auth_url().unwrap(),
            "http://gate.local:5000/gate/auth?project_uuid=proj-1"
        );
        assert_eq!(
            config.endpoint("validate_cookie"),
            "http://gate.local:5000/api/validate_cookie"
        );
    }

    #[test]
    fn test_auth_url_encodes_project() {
        let config = GatewayConfig::new("key", "a b&c=d", "00", "http://gate.local");

        assert_eq!(
            config.auth_url().unwrap(),
            "http://gate.local/gate/auth?project_uuid=a+b%26c%3Dd"
        );
    }

    #[test]
    fn test_validate() {
        assert!(GatewayConfig::new("key", "proj-1", "00", "http://gate").validate().is_ok());

        for config in [
            GatewayConfig::new("", "proj-1", "00", "http://gate"),
            GatewayConfig::new("key", " ", "00", "http://gate"),
            GatewayConfig::new("key", "proj-1", "00", "not a url"),
        ] {
            assert!(matches!(config.validate(), Err(GatewayError::Config(_))));
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = GatewayConfig::new("super-secret", "proj-1", "deadbeef", "http://gate");
        let printed = format!("{:?}", config);

        assert!(printed.contains("proj-1"));
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("deadbeef"));
    }
}
