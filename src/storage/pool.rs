//! Connection pool and database handle
//!
//! `Database` is the storage handle injected into every HTTP handler. It
//! owns a SQLite connection pool and hands out one transaction per unit of
//! work.
//!
//! Every mutation reads (duplicate and existence checks) before it writes.
//! A deferred transaction cannot upgrade its read lock while another writer
//! holds the database, and SQLite fails that upgrade immediately without
//! consulting the busy timeout. Write transactions therefore start with
//! `BEGIN IMMEDIATE`, and file databases run in WAL mode so readers are not
//! blocked by the single writer.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use super::errors::StorageResult;
use super::schema;

/// How long a writer waits for the lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// SQLite connection URL (default: "sqlite://pizzeria.db")
    #[serde(default = "default_url")]
    pub url: String,

    /// Upper bound on pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_url() -> String {
    "sqlite://pizzeria.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl DbConfig {
    /// Create a config for the given URL with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Config for a private in-memory database
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Whether the URL names an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Shared storage handle
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config`.
    ///
    /// The database file is created when missing, foreign keys are enforced
    /// and the `UNICASE` collation is registered on every connection. An
    /// in-memory database lives only as long as its connection, so the pool
    /// is pinned to a single connection that never expires.
    pub async fn connect(config: &DbConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .collation(schema::UNICASE, schema::unicase);

        let (options, pool_options) = if config.is_in_memory() {
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
            (options, pool_options)
        } else {
            let options = options.journal_mode(SqliteJournalMode::Wal);
            let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
            (options, pool_options)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url = %config.url, "Connected to database");

        Ok(Self { pool })
    }

    /// Open the pool and create any missing tables
    pub async fn open(config: &DbConfig) -> StorageResult<Self> {
        let db = Self::connect(config).await?;
        db.bootstrap().await?;
        Ok(db)
    }

    /// Create the tables if they do not exist yet
    pub async fn bootstrap(&self) -> StorageResult<()> {
        schema::create_all(&self.pool).await
    }

    /// Begin a write transaction holding the database write lock.
    ///
    /// Dropping it without commit rolls back.
    pub async fn begin(&self) -> StorageResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Cheap liveness check
    pub async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
