use gf_session::SessionError;

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::StatusCode;
use thiserror::Error;

/// Provider error codes that mean the credentials or account details were
/// refused. `WEAK_PASSWORD` arrives with a trailing explanation, so codes
/// are matched as prefixes.
const CREDENTIAL_CODES: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
    "EMAIL_EXISTS",
    "WEAK_PASSWORD",
    "INVALID_EMAIL",
];

/// Errors that can occur talking to the remote services
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (status: {status}, code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid URL: {message} {location}")]
    Url {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        RemoteError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        RemoteError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api_error(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteError::Api {
            status: status.as_u16(),
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_url(message: impl Into<String>) -> Self {
        RemoteError::Url {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Transport failures, throttling and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { source, .. } => !source.is_decode() && !source.is_builder(),
            Self::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            Self::Url { .. } | Self::Json { .. } => false,
        }
    }

    pub fn is_credential_rejection(&self) -> bool {
        match self {
            Self::Api { code, .. } => CREDENTIAL_CODES
                .iter()
                .any(|known| code.starts_with(known)),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        RemoteError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for RemoteError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        RemoteError::from_json(err)
    }
}

impl From<RemoteError> for SessionError {
    #[track_caller]
    fn from(err: RemoteError) -> Self {
        let message = match &err {
            RemoteError::Api { code, message, .. } if message.is_empty() => code.clone(),
            RemoteError::Api { message, .. } => message.clone(),
            RemoteError::Http { message, .. }
            | RemoteError::Url { message, .. }
            | RemoteError::Json { message, .. } => message.clone(),
        };

        if err.is_credential_rejection() {
            SessionError::invalid_credentials(message)
        } else if err.is_transient() {
            SessionError::remote_service(message)
        } else {
            SessionError::unknown(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
