use crate::RetryPolicy;

use gf_config::Config;

pub const DEFAULT_BOOTSTRAP_ADMIN_EMAIL: &str = "admin@gymfit.com";
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Session service options derived from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub bootstrap_admin_email: String,
    pub users_collection: String,
    pub retry: RetryPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            bootstrap_admin_email: String::from(DEFAULT_BOOTSTRAP_ADMIN_EMAIL),
            users_collection: String::from(DEFAULT_USERS_COLLECTION),
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            bootstrap_admin_email: config.session.bootstrap_admin_email.clone(),
            users_collection: config.session.users_collection.clone(),
            retry: RetryPolicy::from(&config.retry),
        }
    }
}

impl SessionSettings {
    /// Exact match, as addresses are stored by the provider.
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        email == self.bootstrap_admin_email
    }
}
