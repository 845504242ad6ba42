#![allow(dead_code)]

use crate::common::{FakeDocumentStore, FakeIdentityProvider};

use gf_core::{Identity, ProfileRecord, Role};
use gf_session::{
    ConnectivityMonitor, ConnectivityState, SessionService, SessionSettings, SessionState,
};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

pub const USERS: &str = "users";
pub const PASSWORD: &str = "correct horse";

const STATE_WAIT: Duration = Duration::from_secs(60);

/// A running session service wired to in-memory fakes.
pub struct TestSession {
    pub service: SessionService,
    pub identity: Arc<FakeIdentityProvider>,
    pub documents: Arc<FakeDocumentStore>,
    pub connectivity: ConnectivityMonitor,
}

impl TestSession {
    pub fn start(identity: FakeIdentityProvider, documents: FakeDocumentStore) -> Self {
        Self::start_with(identity, documents, ConnectivityState::Online)
    }

    pub fn start_with(
        identity: FakeIdentityProvider,
        documents: FakeDocumentStore,
        connectivity: ConnectivityState,
    ) -> Self {
        let identity = Arc::new(identity);
        let documents = Arc::new(documents);
        let connectivity = ConnectivityMonitor::new(connectivity);

        let service = SessionService::start(
            Arc::clone(&identity) as Arc<dyn gf_session::IdentityProvider>,
            Arc::clone(&documents) as Arc<dyn gf_session::DocumentStore>,
            connectivity.clone(),
            SessionSettings::default(),
        );

        Self {
            service,
            identity,
            documents,
            connectivity,
        }
    }

    /// Wait until session state satisfies `predicate`.
    pub async fn wait_for(&self, predicate: impl FnMut(&SessionState) -> bool) -> SessionState {
        let mut rx = self.service.subscribe();
        let state = tokio::time::timeout(STATE_WAIT, rx.wait_for(predicate))
            .await
            .expect("timed out waiting for session state")
            .expect("session state channel closed");
        state.clone()
    }
}

pub fn member(id: &str, email: &str) -> Identity {
    Identity::new(id, email)
}

pub fn stored_profile(identity: &Identity, name: &str, role: Role) -> Value {
    let record = ProfileRecord::registered(identity, name, role);
    serde_json::to_value(record.to_document()).unwrap()
}
