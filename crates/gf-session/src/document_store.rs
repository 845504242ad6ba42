use crate::Result as SessionResult;

use async_trait::async_trait;
use serde_json::Value;

/// Remote key-value document service addressed by `(collection, id)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when no document exists under the key.
    async fn get(&self, collection: &str, id: &str) -> SessionResult<Option<Value>>;

    async fn set(&self, collection: &str, id: &str, document: Value) -> SessionResult<()>;
}
