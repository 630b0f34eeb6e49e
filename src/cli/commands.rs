//! CLI command implementations
//!
//! Both commands resolve configuration the same way: defaults, optional
//! config file, environment variables, then flags.

use std::path::Path;

use tracing::info;

use crate::http_server::HttpServer;
use crate::storage::Database;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init {
            config,
            database_url,
        } => init(config.as_deref(), database_url),
        Command::Serve {
            config,
            port,
            database_url,
        } => serve(config.as_deref(), port, database_url),
    }
}

/// Resolve configuration and apply command line overrides
pub fn resolve_config(
    config_path: Option<&Path>,
    port: Option<u16>,
    database_url: Option<String>,
) -> CliResult<Config> {
    let mut config = Config::load(config_path)?;

    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(url) = database_url {
        config.database.url = url;
    }

    config.validate()?;
    Ok(config)
}

/// Create the database and its tables, then exit
pub fn init(config_path: Option<&Path>, database_url: Option<String>) -> CliResult<()> {
    let config = resolve_config(config_path, None, database_url)?;

    block_on(async {
        let db = Database::open(&config.database).await?;
        db.close().await;
        info!(url = %config.database.url, "Schema ready");
        Ok::<(), CliError>(())
    })
}

/// Open the database and serve the HTTP API until shutdown
pub fn serve(
    config_path: Option<&Path>,
    port: Option<u16>,
    database_url: Option<String>,
) -> CliResult<()> {
    let config = resolve_config(config_path, port, database_url)?;

    block_on(async {
        let db = Database::open(&config.database).await?;
        let server = HttpServer::new(config.server.clone(), db.clone());

        let addr = server.socket_addr();
        let served = server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server on {} failed: {}", addr, e)));

        db.close().await;
        served
    })
}

fn block_on<F>(future: F) -> CliResult<()>
where
    F: std::future::Future<Output = CliResult<()>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_error(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}
