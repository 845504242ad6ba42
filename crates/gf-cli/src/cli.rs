use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gymfit")]
#[command(about = "GymFit session operator CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Start with connectivity marked offline
    #[arg(long, global = true)]
    pub offline: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
