use crate::http::{error_from_response, parse_base};
use crate::{RemoteError, RemoteResult};

use gf_config::RemoteConfig;
use gf_session::{DocumentStore, Result as SessionResult};

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

/// JSON document store addressed as `{base}/{collection}/{id}`.
pub struct RestDocumentStore {
    client: Client,
    base_url: Url,
}

impl RestDocumentStore {
    pub fn new(client: Client, config: &RemoteConfig) -> RemoteResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base(&config.document_url)?,
        })
    }

    /// Segments are percent-encoded, so ids cannot escape the collection.
    fn document_url(&self, collection: &str, id: &str) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::invalid_url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(collection)
            .push(id);
        Ok(url)
    }

    async fn fetch(&self, collection: &str, id: &str) -> RemoteResult<Option<Value>> {
        let url = self.document_url(collection, id)?;
        debug!("GET {}", url.path());

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(error_from_response(response).await),
        }
    }

    async fn store(&self, collection: &str, id: &str, document: &Value) -> RemoteResult<()> {
        let url = self.document_url(collection, id)?;
        debug!("PUT {}", url.path());

        let response = self.client.put(url).json(document).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> SessionResult<Option<Value>> {
        Ok(self.fetch(collection, id).await?)
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> SessionResult<()> {
        Ok(self.store(collection, id, &document).await?)
    }
}
