use crate::Result as SessionResult;

use async_trait::async_trait;
use gf_core::Identity;
use tokio::sync::broadcast;

/// Identity change pushed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(Identity),
    SignedOut,
}

impl From<Option<Identity>> for AuthChange {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::SignedIn(identity),
            None => Self::SignedOut,
        }
    }
}

/// Remote identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> SessionResult<Identity>;

    async fn create_account(&self, email: &str, password: &str) -> SessionResult<Identity>;

    async fn sign_out(&self) -> SessionResult<()>;

    /// Identity the provider currently considers signed in.
    fn current_identity(&self) -> Option<Identity>;

    /// Stream of identity changes, delivered asynchronously.
    fn subscribe(&self) -> broadcast::Receiver<AuthChange>;
}
