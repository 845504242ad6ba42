#![allow(dead_code)]

use gf_core::Identity;
use gf_session::{AuthChange, IdentityProvider, Result as SessionResult, SessionError};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

const EVENT_BUFFER: usize = 64;

/// In-memory identity provider that echoes changes the way a hosted one
/// would: asynchronously, through its subscription.
pub struct FakeIdentityProvider {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    current: Mutex<Option<Identity>>,
    events: broadcast::Sender<AuthChange>,
    next_id: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub fail_sign_out: AtomicBool,
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            events,
            next_id: AtomicUsize::new(1),
            sign_in_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            fail_sign_out: AtomicBool::new(false),
        }
    }
}

impl FakeIdentityProvider {
    pub fn with_account(self, password: &str, identity: Identity) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(identity.email.clone(), (password.to_string(), identity));
        self
    }

    /// Pretend a session was restored from a previous run.
    pub fn with_current(self, identity: Identity) -> Self {
        *self.current.lock().unwrap() = Some(identity);
        self
    }

    /// Push a change as if it happened outside the app.
    pub fn emit(&self, change: AuthChange) {
        *self.current.lock().unwrap() = match &change {
            AuthChange::SignedIn(identity) => Some(identity.clone()),
            AuthChange::SignedOut => None,
        };
        let _ = self.events.send(change);
    }

    pub fn sign_ins(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SessionResult<Identity> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        let identity = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some((stored, identity)) if stored == password => identity.clone(),
                _ => return Err(SessionError::invalid_credentials("INVALID_LOGIN_CREDENTIALS")),
            }
        };

        self.emit(AuthChange::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn create_account(&self, email: &str, password: &str) -> SessionResult<Identity> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let identity = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(SessionError::invalid_credentials("EMAIL_EXISTS"));
            }
            let id = format!("uid-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            let identity = Identity::new(id, email);
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };

        self.emit(AuthChange::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> SessionResult<()> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(SessionError::remote_service("sign-out rejected"));
        }
        self.emit(AuthChange::SignedOut);
        Ok(())
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.events.subscribe()
    }
}
