mod config;
mod error;
mod log_level;
mod logging_config;
mod remote_config;
mod retry_config;
mod session_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use remote_config::RemoteConfig;
pub use retry_config::RetryConfig;
pub use session_config::SessionConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "GF_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".gymfit";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
