//! HTTP adapters for the identity provider and document store.

pub(crate) mod error;
pub(crate) mod http;
pub(crate) mod rest_document_store;
pub(crate) mod rest_identity_provider;

pub use error::{RemoteError, Result as RemoteResult};
pub use http::build_client;
pub use rest_document_store::RestDocumentStore;
pub use rest_identity_provider::RestIdentityProvider;
