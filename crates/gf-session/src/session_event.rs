use crate::{AuthChange, ConnectivityState, ErrorInfo, FetchTicket};

use gf_core::{Identity, ProfileRecord};

/// Input to the reconciler. Every state change goes through one of these.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    AuthChanged(AuthChange),
    ConnectivityChanged(ConnectivityState),
    FetchCompleted {
        ticket: FetchTicket,
        outcome: Result<ProfileRecord, ErrorInfo>,
    },
    /// A command takes ownership of the session.
    CommandStarted,
    CommandSucceeded {
        generation: u64,
        identity: Identity,
        profile: ProfileRecord,
    },
    CommandFailed {
        generation: u64,
        identity: Option<Identity>,
        error: ErrorInfo,
    },
    /// A command refused to run (e.g. offline) before contacting anything.
    CommandRejected(ErrorInfo),
    /// Record an error without changing phase, identity or profile.
    ErrorRecorded(ErrorInfo),
    /// No-op used to wait until everything queued before it is applied.
    Barrier,
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Applied,
    Unchanged,
    /// A fetch or command outcome that no longer matches the session
    Discarded,
    /// Applied, and a profile fetch must be started for this ticket
    FetchRequested {
        ticket: FetchTicket,
        identity: Identity,
    },
    /// Applied, and the command owns this generation
    CommandGeneration(u64),
}

impl Transition {
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            Self::Applied | Self::FetchRequested { .. } | Self::CommandGeneration(_)
        )
    }
}
