use crate::{
    AuthChange, Result as SessionResult, SessionError, SessionEvent, SessionService, Transition,
};

use gf_core::{Identity, ProfileRecord, Role};
use log::{info, warn};
use tracing::{Instrument, info_span};
use uuid::Uuid;

/// Create a tracing span for a user-initiated session command.
pub fn create_command_span(operation: &str) -> tracing::Span {
    info_span!(
        "session_command",
        command_id = %Uuid::new_v4(),
        operation = %operation,
    )
}

type CommandOutcome = Result<(Identity, ProfileRecord), (Option<Identity>, SessionError)>;

impl SessionService {
    /// Sign in with email and password and load the profile.
    ///
    /// Session state reflects the outcome by the time this returns.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<ProfileRecord> {
        async {
            self.ensure_online("login").await?;
            let generation = self.begin_command().await?;

            let inner = self.inner();
            let outcome = match inner.identity.sign_in_with_password(email, password).await {
                Ok(identity) => match inner.resolver.resolve(&identity).await {
                    Ok(profile) => Ok((identity, profile)),
                    Err(e) => Err((Some(identity), e)),
                },
                Err(e) => Err((None, e)),
            };

            self.finish_command(generation, outcome).await
        }
        .instrument(create_command_span("login"))
        .await
    }

    /// Create an account and its profile.
    ///
    /// The configured bootstrap admin address always registers as admin;
    /// anyone else gets `role`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> SessionResult<ProfileRecord> {
        async {
            self.ensure_online("register").await?;

            let role = if self.settings().is_bootstrap_admin(email) {
                Role::Admin
            } else {
                role
            };

            let generation = self.begin_command().await?;

            let inner = self.inner();
            let outcome = match inner.identity.create_account(email, password).await {
                Ok(identity) => {
                    // Brand-new identity: written without an existence check
                    let profile = ProfileRecord::registered(&identity, name, role);
                    match inner.resolver.profiles().create(&profile).await {
                        Ok(()) => Ok((identity, profile)),
                        Err(e) => Err((Some(identity), e)),
                    }
                }
                Err(e) => Err((None, e)),
            };

            self.finish_command(generation, outcome).await
        }
        .instrument(create_command_span("register"))
        .await
    }

    /// Sign out. On failure the session is left as it was, with the error
    /// recorded.
    pub async fn logout(&self) -> SessionResult<()> {
        async {
            match self.inner().identity.sign_out().await {
                Ok(()) => {
                    self.submit(SessionEvent::AuthChanged(AuthChange::SignedOut))
                        .await?;
                    info!("Signed out");
                    Ok(())
                }
                Err(e) => {
                    warn!("Sign-out failed: {e}");
                    self.submit(SessionEvent::ErrorRecorded(e.to_info())).await?;
                    Err(e)
                }
            }
        }
        .instrument(create_command_span("logout"))
        .await
    }

    /// Fail fast, without contacting anything, when offline.
    async fn ensure_online(&self, operation: &str) -> SessionResult<()> {
        if self.connectivity().is_online() {
            return Ok(());
        }

        warn!("{operation} rejected: offline");
        self.reject(SessionError::offline(format!(
            "Cannot {operation} while offline. Please check your internet connection and try again."
        )))
        .await
    }

    /// Record a command that failed before contacting anything.
    async fn reject<T>(&self, error: SessionError) -> SessionResult<T> {
        self.submit(SessionEvent::CommandRejected(error.to_info()))
            .await?;
        Err(error)
    }

    async fn begin_command(&self) -> SessionResult<u64> {
        match self.submit(SessionEvent::CommandStarted).await? {
            Transition::CommandGeneration(generation) => Ok(generation),
            other => Err(SessionError::unknown(format!(
                "unexpected transition starting command: {other:?}"
            ))),
        }
    }

    async fn finish_command(
        &self,
        generation: u64,
        outcome: CommandOutcome,
    ) -> SessionResult<ProfileRecord> {
        match outcome {
            Ok((identity, profile)) => {
                let event = SessionEvent::CommandSucceeded {
                    generation,
                    identity: identity.clone(),
                    profile: profile.clone(),
                };
                if self.submit(event).await? == Transition::Discarded {
                    warn!(
                        "Session changed while the command for {} was running",
                        identity.id
                    );
                    return Err(SessionError::superseded());
                }
                info!("Signed in as {} ({})", identity.email, profile.role);
                Ok(profile)
            }
            Err((identity, error)) => {
                let event = SessionEvent::CommandFailed {
                    generation,
                    identity,
                    error: error.to_info(),
                };
                self.submit(event).await?;
                Err(error)
            }
        }
    }
}
