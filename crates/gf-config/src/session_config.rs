use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_BOOTSTRAP_ADMIN_EMAIL: &str = "admin@gymfit.com";
pub const DEFAULT_USERS_COLLECTION: &str = "users";
pub const DEFAULT_START_ONLINE: bool = true;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Registrations with exactly this email always get the admin role
    pub bootstrap_admin_email: String,
    /// Document store collection holding profiles
    pub users_collection: String,
    /// Initial connectivity assumed at startup
    pub start_online: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bootstrap_admin_email: String::from(DEFAULT_BOOTSTRAP_ADMIN_EMAIL),
            users_collection: String::from(DEFAULT_USERS_COLLECTION),
            start_online: DEFAULT_START_ONLINE,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let email = self.bootstrap_admin_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ConfigError::session(format!(
                "session.bootstrap_admin_email must be an email address, got '{}'",
                self.bootstrap_admin_email
            )));
        }

        if self.users_collection.trim().is_empty() || self.users_collection.contains('/') {
            return Err(ConfigError::session(format!(
                "session.users_collection must be a non-empty name without '/', got '{}'",
                self.users_collection
            )));
        }

        Ok(())
    }
}
