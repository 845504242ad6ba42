use crate::http::{error_from_response, parse_base};
use crate::{RemoteError, RemoteResult};

use gf_config::RemoteConfig;
use gf_core::Identity;
use gf_session::{AuthChange, IdentityProvider, Result as SessionResult};

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const AUTH_EVENT_BUFFER: usize = 16;
const SIGN_IN_ACTION: &str = "signInWithPassword";
const SIGN_UP_ACTION: &str = "signUp";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl From<AccountResponse> for Identity {
    fn from(response: AccountResponse) -> Self {
        let identity = Identity::new(response.local_id, response.email);
        match response.display_name.filter(|name| !name.is_empty()) {
            Some(name) => identity.with_display_name(name),
            None => identity,
        }
    }
}

/// Email/password identity provider speaking the identity toolkit REST
/// dialect. The signed-in identity is held in memory for this process.
pub struct RestIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    current: RwLock<Option<Identity>>,
    changes: broadcast::Sender<AuthChange>,
}

impl RestIdentityProvider {
    pub fn new(client: Client, config: &RemoteConfig) -> RemoteResult<Self> {
        let (changes, _) = broadcast::channel(AUTH_EVENT_BUFFER);
        Ok(Self {
            client,
            base_url: parse_base(&config.identity_url)?,
            api_key: config.api_key.clone(),
            current: RwLock::new(None),
            changes,
        })
    }

    fn endpoint(&self, action: &str) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::invalid_url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(&format!("accounts:{action}"));

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    async fn authenticate(&self, action: &str, email: &str, password: &str) -> RemoteResult<Identity> {
        let url = self.endpoint(action)?;
        debug!("POST {}", url.path());

        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let account: AccountResponse = response.json().await?;
        Ok(Identity::from(account))
    }

    fn replace_current(&self, identity: Option<Identity>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = identity.clone();

        // No subscribers is fine
        let _ = self.changes.send(AuthChange::from(identity));
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionResult<Identity> {
        let identity = self.authenticate(SIGN_IN_ACTION, email, password).await?;
        info!("Identity provider accepted {}", identity.id);
        self.replace_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn create_account(&self, email: &str, password: &str) -> SessionResult<Identity> {
        let identity = self.authenticate(SIGN_UP_ACTION, email, password).await?;
        info!("Identity provider created account {}", identity.id);
        self.replace_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> SessionResult<()> {
        self.replace_current(None);
        Ok(())
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}
