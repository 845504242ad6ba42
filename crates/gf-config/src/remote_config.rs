use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_IDENTITY_URL: &str = "http://127.0.0.1:9099/identitytoolkit/v1";
pub const DEFAULT_DOCUMENT_URL: &str = "http://127.0.0.1:8080/documents";

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoints of the identity provider and document store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub identity_url: String,
    pub document_url: String,
    /// Sent as the `key` query parameter to the identity provider
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            identity_url: String::from(DEFAULT_IDENTITY_URL),
            document_url: String::from(DEFAULT_DOCUMENT_URL),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::validate_url("remote.identity_url", &self.identity_url)?;
        Self::validate_url("remote.document_url", &self.document_url)?;

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::remote(format!(
                "remote.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            return Err(ConfigError::remote("remote.api_key cannot be empty when set"));
        }

        Ok(())
    }

    fn validate_url(field: &str, url: &str) -> ConfigErrorResult<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::remote(format!(
                "{field} must start with http:// or https://, got '{url}'"
            )));
        }
        Ok(())
    }
}
