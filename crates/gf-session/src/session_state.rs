use crate::SessionPhase;
use crate::error_codes::CONNECTIVITY_LOST;

use gf_core::{Identity, ProfileRecord};
use serde::Serialize;

const OFFLINE_NOTICE: &str =
    "You are currently offline. Please check your internet connection to access your account.";

/// Structured error recorded on the session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn offline_notice() -> Self {
        Self::new(CONNECTIVITY_LOST, OFFLINE_NOTICE)
    }

    pub fn is_offline_notice(&self) -> bool {
        self.code == CONNECTIVITY_LOST
    }
}

/// Authoritative view of who is signed in. Written only by the reconciler.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub identity: Option<Identity>,
    pub profile: Option<ProfileRecord>,
    pub last_error: Option<ErrorInfo>,
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn is_admin(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.role.is_admin())
    }

    pub fn identity_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.id.as_str())
    }
}
