
use crate::{Result as SessionResult, SessionError};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

/// In-memory document store for unit tests.
#[derive(Default)]
pub(crate) struct MemoryDocuments {
    pub(crate) documents: Mutex<HashMap<(String, String), Value>>,
    pub(crate) get_calls: AtomicUsize,
    pub(crate) set_calls: AtomicUsize,
    pub(crate) failing_gets: AtomicUsize,
    pub(crate) fail_sets: std::sync::atomic::AtomicBool,
}

impl MemoryDocuments {
    pub(crate) fn insert(&self, collection: &str, id: &str, document: Value) {
        self.documents
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), document);
    }

    pub(crate) fn stored(&self, collection: &str, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl crate::DocumentStore for MemoryDocuments {
    async fn get(&self, collection: &str, id: &str) -> SessionResult<Option<Value>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failing_gets.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_gets.store(remaining - 1, Ordering::SeqCst);
            return Err(SessionError::remote_service("document store unavailable"));
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
