use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, RemoteConfig, RetryConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub retry: RetryConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for GF_CONFIG_DIR env var, else use ./.gymfit/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply GF_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: GF_CONFIG_DIR env var > ./.gymfit/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.session.validate()?;
        self.retry.validate()?;
        self.remote.validate()?;

        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be empty when set"));
        }

        Ok(())
    }

    /// Log file path resolved against the config directory when relative.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            None => Ok(None),
            Some(file) => {
                let path = PathBuf::from(file);
                if path.is_absolute() {
                    Ok(Some(path))
                } else {
                    Ok(Some(Self::config_dir()?.join(path)))
                }
            }
        }
    }

    /// Log configuration summary (NEVER logs the API key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  session: bootstrap_admin={}, collection={}, start_online={}",
            self.session.bootstrap_admin_email,
            self.session.users_collection,
            self.session.start_online
        );
        info!(
            "  retry: attempts={}, base={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_attempts,
            self.retry.base_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );
        info!(
            "  remote: identity={}, documents={}, api_key={}, timeout={}s",
            self.remote.identity_url,
            self.remote.document_url,
            if self.remote.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.remote.timeout_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Session
        Self::apply_env_string(
            "GF_SESSION_BOOTSTRAP_ADMIN_EMAIL",
            &mut self.session.bootstrap_admin_email,
        );
        Self::apply_env_string(
            "GF_SESSION_USERS_COLLECTION",
            &mut self.session.users_collection,
        );
        Self::apply_env_bool("GF_SESSION_START_ONLINE", &mut self.session.start_online);

        // Retry
        Self::apply_env_parse("GF_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse("GF_RETRY_BASE_DELAY_MS", &mut self.retry.base_delay_ms);
        Self::apply_env_parse("GF_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "GF_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("GF_RETRY_JITTER", &mut self.retry.jitter);

        // Remote
        Self::apply_env_string("GF_REMOTE_IDENTITY_URL", &mut self.remote.identity_url);
        Self::apply_env_string("GF_REMOTE_DOCUMENT_URL", &mut self.remote.document_url);
        Self::apply_env_option_string("GF_REMOTE_API_KEY", &mut self.remote.api_key);
        Self::apply_env_parse("GF_REMOTE_TIMEOUT_SECS", &mut self.remote.timeout_secs);

        // Logging
        Self::apply_env_parse("GF_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("GF_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("GF_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
