#![allow(dead_code)]

use gf_session::{DocumentStore, Result as SessionResult, SessionError};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

const RELEASED_PERMITS: usize = 1024;

/// In-memory document store with failure injection and a gate that holds
/// reads until released.
pub struct FakeDocumentStore {
    documents: Mutex<HashMap<(String, String), Value>>,
    held: AtomicBool,
    gate: Semaphore,
    pub failing_gets: AtomicUsize,
    pub fail_sets: AtomicBool,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

impl Default for FakeDocumentStore {
    fn default() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
            failing_gets: AtomicUsize::new(0),
            fail_sets: AtomicBool::new(false),
            get_calls: AtomicUsize::new(0),
            set_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeDocumentStore {
    pub fn with_document(self, collection: &str, id: &str, document: Value) -> Self {
        self.insert(collection, id, document);
        self
    }

    pub fn insert(&self, collection: &str, id: &str, document: Value) {
        self.documents
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), document);
    }

    pub fn stored(&self, collection: &str, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    /// Block every read until `release` is called.
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.gate.add_permits(RELEASED_PERMITS);
    }

    pub fn fail_next_gets(&self, count: usize) {
        self.failing_gets.store(count, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> SessionResult<Option<Value>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        if self.held.load(Ordering::SeqCst) {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        }

        let failing = self.failing_gets.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_gets.store(failing - 1, Ordering::SeqCst);
            return Err(SessionError::remote_service("document service unavailable"));
        }

        Ok(self.stored(collection, id))
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> SessionResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(SessionError::remote_service("write rejected"));
        }
        self.insert(collection, id, document);
        Ok(())
    }
}
