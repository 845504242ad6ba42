use crate::{RemoteError, RemoteResult};

use gf_config::RemoteConfig;
use reqwest::{Client, Response, Url};
use serde_json::Value;

/// Shared HTTP client with the configured request timeout.
pub fn build_client(config: &RemoteConfig) -> RemoteResult<Client> {
    Ok(Client::builder().timeout(config.timeout()).build()?)
}

pub(crate) fn parse_base(base_url: &str) -> RemoteResult<Url> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| RemoteError::invalid_url(format!("{trimmed}: {e}")))
}

/// Turn a non-success response into `RemoteError::Api`.
///
/// Understands `{"error": {"message": "CODE"}}` and
/// `{"error": {"code": "...", "message": "..."}}` bodies; anything else
/// keeps the status with an empty code.
pub(crate) async fn error_from_response(response: Response) -> RemoteError {
    let status = response.status();
    let body: Option<Value> = response.json().await.ok();
    let error = body.as_ref().and_then(|body| body.get("error"));

    let field = |name: &str| {
        error
            .and_then(|error| error.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match (field("code"), field("message")) {
        (Some(code), message) => RemoteError::api_error(status, code, message.unwrap_or_default()),
        (None, Some(message)) => {
            // Identity provider style: the message is the code
            RemoteError::api_error(status, message, String::new())
        }
        (None, None) => RemoteError::api_error(
            status,
            String::new(),
            status.canonical_reason().unwrap_or("request failed"),
        ),
    }
}
