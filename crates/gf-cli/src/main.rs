//! gymfit - session operator CLI
//!
//! Signs in, registers or signs out against the configured identity
//! provider and document store, then prints the resulting session state.
//!
//! # Examples
//!
//! ```bash
//! gymfit login --email member@example.com --password secret --pretty
//! gymfit register --email new@example.com --password secret --name "New Member"
//! gymfit --offline login --email member@example.com --password secret
//! ```

use gf_cli::{Cli, CliResult, logger, render, run_command};
use gf_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CliResult<String> {
    let config = Config::load()?;
    config.validate()?;

    // Before anything else logs
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting gymfit v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let state = run_command(cli, &config).await?;
    render(&state, cli.pretty)
}
