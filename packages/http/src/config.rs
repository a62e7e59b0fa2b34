//! HTTP client settings.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the client shared by the HTTP handlers.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```json
/// {"timeout_secs": 5, "default_headers": {"Authorization": "Bearer token"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Headers sent with every request.
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("urlio/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Add a default header that will be sent with every request
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn build_client(&self) -> Result<Client, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(self.timeout())
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: HttpConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.user_agent.starts_with("urlio/"));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn bad_header_fails_client_construction() {
        let config = HttpConfig::default().with_default_header("bad header", "x");
        assert!(matches!(
            config.build_client(),
            Err(Error::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn default_config_builds() {
        assert!(HttpConfig::default().build_client().is_ok());
    }
}
