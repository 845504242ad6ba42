use crate::ErrorInfo;
use crate::error_codes::{
    INVALID_CREDENTIALS, OFFLINE, PROFILE_NOT_FOUND, REMOTE_SERVICE, UNKNOWN,
};

use std::panic::Location;

use error_location::ErrorLocation;
use gf_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Offline: {message} {location}")]
    Offline {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Profile not found for identity {identity_id} {location}")]
    ProfileNotFound {
        identity_id: String,
        location: ErrorLocation,
    },

    #[error("Remote service error: {message} {location}")]
    RemoteService {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected error: {message} {location}")]
    Unknown {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn offline(message: impl Into<String>) -> Self {
        Self::Offline {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_not_found(identity_id: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            identity_id: identity_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn remote_service(message: impl Into<String>) -> Self {
        Self::RemoteService {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Raised by commands issued after `SessionService::shutdown`.
    #[track_caller]
    pub fn shut_down() -> Self {
        Self::unknown("session service is shut down")
    }

    /// Raised by a command whose outcome was overtaken by a sign-out or
    /// identity switch before it could be applied.
    #[track_caller]
    pub fn superseded() -> Self {
        Self::unknown("session changed while the command was running")
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Offline { .. } => OFFLINE,
            Self::InvalidCredentials { .. } => INVALID_CREDENTIALS,
            Self::ProfileNotFound { .. } => PROFILE_NOT_FOUND,
            Self::RemoteService { .. } => REMOTE_SERVICE,
            Self::Unknown { .. } => UNKNOWN,
        }
    }

    /// Human-readable message without the source location.
    pub fn message(&self) -> String {
        match self {
            Self::Offline { message, .. }
            | Self::InvalidCredentials { message, .. }
            | Self::RemoteService { message, .. }
            | Self::Unknown { message, .. } => message.clone(),
            Self::ProfileNotFound { identity_id, .. } => {
                format!("No profile exists for identity {identity_id}")
            }
        }
    }

    /// Structured form recorded in `SessionState::last_error`.
    pub fn to_info(&self) -> ErrorInfo {
        ErrorInfo::new(self.error_code(), self.message())
    }
}

impl From<CoreError> for SessionError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Unknown {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Unknown {
            message: format!("Failed to encode document: {source}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
