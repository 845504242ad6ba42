//! gf-cli library
//!
//! Exposes the command runner so it can be driven from tests.

pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub mod logger;


pub use app::{render, run_command};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
