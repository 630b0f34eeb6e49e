//! CLI argument definitions using clap
//!
//! Commands:
//! - pizzeria serve [--config <path>] [--port <port>] [--database-url <url>]
//! - pizzeria init [--config <path>] [--database-url <url>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pizzeria - pizza and topping management API
#[derive(Parser, Debug)]
#[command(name = "pizzeria")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema and exit
    Init {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Database URL, overrides config and DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overrides config and PIZZERIA_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Database URL, overrides config and DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["pizzeria", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                database_url,
            } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
                assert!(database_url.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from([
            "pizzeria",
            "init",
            "--config",
            "menu.json",
            "--database-url",
            "sqlite://menu.db",
        ])
        .unwrap();
        match cli.command {
            Command::Init {
                config,
                database_url,
            } => {
                assert_eq!(config, Some(PathBuf::from("menu.json")));
                assert_eq!(database_url.as_deref(), Some("sqlite://menu.db"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["pizzeria"]).is_err());
    }
}
