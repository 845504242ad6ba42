use crate::{
    AuthChange, ConnectivityMonitor, ConnectivityState, ErrorInfo, FetchTicket, IsRetryable,
    SessionError, SessionEvent, SessionPhase, SessionState, Transition,
};

use gf_core::{Identity, ProfileRecord};
use log::{debug, info, warn};

/// The session state machine.
///
/// Pure and synchronous: the runtime feeds it one event at a time and
/// carries out the fetches it asks for. It is the only writer of
/// `SessionState`.
pub struct Reconciler {
    state: SessionState,
    /// Bumped whenever the tracked identity may change; outcomes tagged with
    /// an older generation are stale.
    generation: u64,
    /// Generation owned by an unfinished command, if any
    command_generation: Option<u64>,
    connectivity: ConnectivityMonitor,
}

impl Reconciler {
    pub fn new(connectivity: ConnectivityMonitor) -> Self {
        Self {
            state: SessionState::default(),
            generation: 0,
            command_generation: None,
            connectivity,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        let before = self.state.phase;

        let transition = match event {
            SessionEvent::AuthChanged(AuthChange::SignedIn(identity)) => {
                self.on_signed_in(identity)
            }
            SessionEvent::AuthChanged(AuthChange::SignedOut) => self.on_signed_out(),
            SessionEvent::ConnectivityChanged(state) => self.on_connectivity(state),
            SessionEvent::FetchCompleted { ticket, outcome } => {
                self.on_fetch_completed(ticket, outcome)
            }
            SessionEvent::CommandStarted => self.on_command_started(),
            SessionEvent::CommandSucceeded {
                generation,
                identity,
                profile,
            } => self.on_command_succeeded(generation, identity, profile),
            SessionEvent::CommandFailed {
                generation,
                identity,
                error,
            } => self.on_command_failed(generation, identity, error),
            SessionEvent::CommandRejected(error) => self.on_command_rejected(error),
            SessionEvent::ErrorRecorded(error) => {
                self.state.last_error = Some(error);
                Transition::Applied
            }
            SessionEvent::Barrier => Transition::Unchanged,
        };

        if self.state.phase != before {
            info!("Session phase {:?} -> {:?}", before, self.state.phase);
        }

        transition
    }

    fn command_active(&self) -> bool {
        self.command_generation == Some(self.generation)
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn on_signed_in(&mut self, identity: Identity) -> Transition {
        if self.command_active() {
            debug!("Sign-in of {} is handled by the running command", identity.id);
            return Transition::Unchanged;
        }

        // an echo of the identity being loaded or already loaded; Errored re-fetches
        let already_tracked = self.state.identity_id() == Some(identity.id.as_str())
            && matches!(self.state.phase, SessionPhase::Loading | SessionPhase::Ready);
        if already_tracked {
            debug!("Sign-in of {} already tracked", identity.id);
            return Transition::Unchanged;
        }

        let generation = self.next_generation();

        if !self.connectivity.is_online() {
            warn!("Signed in as {} while offline; profile not loaded", identity.id);
            self.state = SessionState {
                phase: SessionPhase::Errored,
                identity: Some(identity),
                profile: None,
                last_error: Some(SessionError::offline_error("load your profile").to_info()),
            };
            return Transition::Applied;
        }

        let ticket = FetchTicket {
            identity_id: identity.id.clone(),
            generation,
        };
        self.state = SessionState {
            phase: SessionPhase::Loading,
            identity: Some(identity.clone()),
            profile: None,
            last_error: None,
        };
        Transition::FetchRequested { ticket, identity }
    }

    fn on_signed_out(&mut self) -> Transition {
        self.next_generation();
        self.state = SessionState {
            phase: SessionPhase::SignedOut,
            identity: None,
            profile: None,
            last_error: None,
        };
        Transition::Applied
    }

    fn on_connectivity(&mut self, state: ConnectivityState) -> Transition {
        match state {
            ConnectivityState::Offline => {
                // An in-flight fetch finds out through its own retry loop
                self.state.last_error = Some(ErrorInfo::offline_notice());
                Transition::Applied
            }
            ConnectivityState::Online => {
                let had_notice = self
                    .state
                    .last_error
                    .as_ref()
                    .is_some_and(ErrorInfo::is_offline_notice);
                if had_notice {
                    self.state.last_error = None;
                    Transition::Applied
                } else {
                    Transition::Unchanged
                }
            }
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.state.phase == SessionPhase::Loading
            && ticket.generation == self.generation
            && self.state.identity_id() == Some(ticket.identity_id.as_str())
    }

    fn on_fetch_completed(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<ProfileRecord, ErrorInfo>,
    ) -> Transition {
        if !self.is_current(&ticket) {
            debug!(
                "Discarding stale profile fetch for {} (generation {}, current {})",
                ticket.identity_id, ticket.generation, self.generation
            );
            return Transition::Discarded;
        }

        match outcome {
            Ok(profile) if profile.id == ticket.identity_id => {
                self.state.phase = SessionPhase::Ready;
                self.state.profile = Some(profile);
                self.state.last_error = None;
            }
            Ok(profile) => {
                warn!(
                    "Profile {} returned for identity {}",
                    profile.id, ticket.identity_id
                );
                self.fail(SessionError::unknown("profile does not belong to identity").to_info());
            }
            Err(error) => self.fail(error),
        }
        Transition::Applied
    }

    fn fail(&mut self, error: ErrorInfo) {
        self.state.phase = SessionPhase::Errored;
        self.state.profile = None;
        self.state.last_error = Some(error);
    }

    fn on_command_started(&mut self) -> Transition {
        let generation = self.next_generation();
        self.command_generation = Some(generation);
        self.state = SessionState {
            phase: SessionPhase::Loading,
            identity: None,
            profile: None,
            last_error: None,
        };
        Transition::CommandGeneration(generation)
    }

    fn on_command_succeeded(
        &mut self,
        generation: u64,
        identity: Identity,
        profile: ProfileRecord,
    ) -> Transition {
        if generation != self.generation || !profile.belongs_to(&identity) {
            debug!("Discarding superseded command result for {}", identity.id);
            return Transition::Discarded;
        }

        self.command_generation = None;
        self.state = SessionState {
            phase: SessionPhase::Ready,
            identity: Some(identity),
            profile: Some(profile),
            last_error: None,
        };
        Transition::Applied
    }

    fn on_command_failed(
        &mut self,
        generation: u64,
        identity: Option<Identity>,
        error: ErrorInfo,
    ) -> Transition {
        if generation != self.generation {
            debug!("Discarding superseded command failure: {}", error.message);
            return Transition::Discarded;
        }

        self.command_generation = None;
        self.state = SessionState {
            phase: SessionPhase::Errored,
            identity,
            profile: None,
            last_error: Some(error),
        };
        Transition::Applied
    }

    fn on_command_rejected(&mut self, error: ErrorInfo) -> Transition {
        self.next_generation();
        self.command_generation = None;
        self.state = SessionState {
            phase: SessionPhase::Errored,
            identity: None,
            profile: None,
            last_error: Some(error),
        };
        Transition::Applied
    }
}
