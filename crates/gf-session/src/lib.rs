//! Session reconciliation core.
//!
//! Keeps "who is signed in and what is their profile" consistent with a
//! remote identity provider and profile store. All state changes funnel
//! through a single [`Reconciler`] driven by [`SessionService`].

pub mod commands;
pub mod connectivity_monitor;
pub mod connectivity_state;
pub mod document_store;
pub mod error;
pub mod error_codes;
pub mod fetch_ticket;
pub mod identity_provider;
pub mod profile_resolver;
pub mod profile_store;
pub mod reconciler;
pub mod retry;
pub mod session_event;
pub mod session_phase;
pub mod session_service;
pub mod session_settings;
pub mod session_state;

mod shutdown_signal;

pub use commands::create_command_span;
pub use connectivity_monitor::ConnectivityMonitor;
pub use connectivity_state::ConnectivityState;
pub use document_store::DocumentStore;
pub use error::{Result, SessionError};
pub use fetch_ticket::FetchTicket;
pub use identity_provider::{AuthChange, IdentityProvider};
pub use profile_resolver::ProfileResolver;
pub use profile_store::ProfileStore;
pub use reconciler::Reconciler;
pub use retry::{IsRetryable, RetryPolicy, with_retry};
pub use session_event::{SessionEvent, Transition};
pub use session_phase::SessionPhase;
pub use session_service::SessionService;
pub use session_settings::SessionSettings;
pub use session_state::{ErrorInfo, SessionState};

#[cfg(test)]
mod tests;
