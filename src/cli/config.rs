//! CLI configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional JSON config file
//! 3. `DATABASE_URL` and `PIZZERIA_PORT` environment variables
//! 4. Command line flags (applied by the CLI)

use std::env;
use std::fs;
use std::path::Path;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http_server::HttpServerConfig;
use crate::storage::DbConfig;

use super::errors::{CliError, CliResult};

/// Environment variable overriding the database URL
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the listen port
pub const PORT_VAR: &str = "PIZZERIA_PORT";

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DbConfig,
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Defaults, then the file if given, then environment overrides
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(env::var(DATABASE_URL_VAR).ok(), env::var(PORT_VAR).ok())?;
        Ok(config)
    }

    /// Apply environment-style string overrides
    pub fn apply_overrides(
        &mut self,
        database_url: Option<String>,
        port: Option<String>,
    ) -> CliResult<()> {
        if let Some(url) = database_url {
            self.database.url = url;
        }

        if let Some(port) = port {
            self.server.port = port.trim().parse().map_err(|e| {
                CliError::config_error(format!("Invalid {} '{}': {}", PORT_VAR, port, e))
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        for origin in &self.server.cors_origins {
            if origin.parse::<HeaderValue>().is_err() {
                return Err(CliError::config_error(format!(
                    "server.cors_origins entry '{}' is not a valid origin",
                    origin.escape_debug()
                )));
            }
        }

        if self.database.url.trim().is_empty() {
            return Err(CliError::config_error("database.url must not be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(CliError::config_error(
                "database.max_connections must be >= 1",
            ));
        }

        Ok(())
    }
}
