use crate::{ConnectivityMonitor, DocumentStore, Result as SessionResult, RetryPolicy, SessionError};
use crate::retry::with_retry;

use std::sync::Arc;

use gf_core::ProfileRecord;
use log::info;

/// Profile access on top of the document store.
#[derive(Clone)]
pub struct ProfileStore {
    documents: Arc<dyn DocumentStore>,
    collection: String,
    connectivity: ConnectivityMonitor,
    retry: RetryPolicy,
}

impl ProfileStore {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        connectivity: ConnectivityMonitor,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            documents,
            collection: collection.into(),
            connectivity,
            retry,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fetch the profile keyed by `identity_id`, retrying transient failures.
    ///
    /// Absence is reported as `SessionError::ProfileNotFound`.
    pub async fn get(&self, identity_id: &str) -> SessionResult<ProfileRecord> {
        let document = with_retry(&self.retry, &self.connectivity, "fetch profile", || {
            self.documents.get(&self.collection, identity_id)
        })
        .await?;

        match document {
            Some(value) => Ok(ProfileRecord::from_value(identity_id, value)?),
            None => Err(SessionError::profile_not_found(identity_id)),
        }
    }

    /// Write a new profile. Never retried: a repeated create after a
    /// partial success could clobber a record written in between.
    pub async fn create(&self, record: &ProfileRecord) -> SessionResult<()> {
        let document = serde_json::to_value(record.to_document())?;
        self.documents
            .set(&self.collection, &record.id, document)
            .await?;
        info!(
            "Created profile {} in '{}' (role: {})",
            record.id, self.collection, record.role
        );
        Ok(())
    }
}
