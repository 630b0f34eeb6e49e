//! CLI module for pizzeria
//!
//! Provides command-line interface for:
//! - init: Create the database schema
//! - serve: Start the HTTP API server

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, resolve_config, run_command, serve};
pub use config::{Config, DATABASE_URL_VAR, PORT_VAR};
pub use errors::{CliError, CliErrorCode, CliResult};

use crate::observability::init_tracing;

/// Parse arguments, install logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();
    run_command(cli.command)
}
