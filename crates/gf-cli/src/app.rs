use crate::{Cli, CliResult, Commands};

use gf_config::Config;
use gf_remote::{RestDocumentStore, RestIdentityProvider, build_client};
use gf_session::{
    ConnectivityMonitor, ConnectivityState, Result as SessionResult, SessionService,
    SessionSettings, SessionState,
};

use std::sync::Arc;

use log::{info, warn};

/// Run one command against a fresh session and return the settled state.
///
/// The service is always shut down, also when the command fails.
pub async fn run_command(cli: &Cli, config: &Config) -> CliResult<SessionState> {
    let client = build_client(&config.remote)?;
    let identity = Arc::new(RestIdentityProvider::new(client.clone(), &config.remote)?);
    let documents = Arc::new(RestDocumentStore::new(client, &config.remote)?);

    let initial = if cli.offline || !config.session.start_online {
        ConnectivityState::Offline
    } else {
        ConnectivityState::Online
    };

    let service = SessionService::start(
        identity,
        documents,
        ConnectivityMonitor::new(initial),
        SessionSettings::from(config),
    );

    let outcome = execute(&service, &cli.command).await;
    let flushed = service.flush().await;
    let state = service.snapshot();
    service.shutdown().await;

    if let Err(e) = &outcome {
        warn!("Command failed: {e}");
    }
    outcome?;
    flushed?;

    info!("Session settled in phase {:?}", state.phase);
    Ok(state)
}

async fn execute(service: &SessionService, command: &Commands) -> SessionResult<()> {
    match command {
        Commands::Login { email, password } => service.login(email, password).await.map(|_| ()),
        Commands::Register {
            email,
            password,
            name,
            role,
        } => service
            .register(email, password, name, *role)
            .await
            .map(|_| ()),
        Commands::Logout => service.logout().await,
    }
}

/// Session state as JSON for stdout.
pub fn render(state: &SessionState, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    Ok(json)
}
