//! Embedded database handle.
//!
//! Wraps a SQLx SQLite pool together with a SeaORM connection built on top of
//! the same pool. Connection settings are applied through typed
//! `SqliteConnectOptions` rather than by rewriting the DSN.
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> db::Result<()> {
//!     use db::{ConnectOpts, DbHandle};
//!
//!     let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//!     sqlx::query("select 1").execute(db.sqlx_sqlite()).await?;
//!     let _conn = db.sea();
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod sqlite;

use std::str::FromStr;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use thiserror::Error;

pub use errors::is_unique_violation;
pub use sqlite::dsn::{absolutize_sqlite_dsn, is_memory_dsn};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unsupported DSN (expected sqlite): {0}")]
    UnknownDsn(String),

    #[error("Invalid SQLite DSN '{dsn}': {reason}")]
    InvalidDsn { dsn: String, reason: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool (file databases only).
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// How long SQLite waits on a locked database before failing.
    pub busy_timeout: Option<Duration>,
    /// For file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            busy_timeout: Some(Duration::from_millis(DEFAULT_SQLITE_BUSY_TIMEOUT_MS)),
            create_sqlite_dirs: true,
        }
    }
}

const DEFAULT_SQLITE_BUSY_TIMEOUT_MS: u64 = 5000;

/// Main handle.
#[derive(Debug, Clone)]
pub struct DbHandle {
    pool: SqlitePool,
    dsn: String,
    in_memory: bool,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Connect and build handle.
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to a single pooled connection that never idles out.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let dsn = dsn.trim();
        if !dsn.starts_with("sqlite:") {
            return Err(DbError::UnknownDsn(dsn.to_string()));
        }
        let in_memory = is_memory_dsn(dsn);

        if !in_memory {
            sqlite::path::prepare_sqlite_path(dsn, opts.create_sqlite_dirs)?;
        }

        let mut connect = SqliteConnectOptions::from_str(dsn)
            .map_err(|e| DbError::InvalidDsn {
                dsn: dsn.to_string(),
                reason: e.to_string(),
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal);
        if !in_memory {
            connect = connect.journal_mode(SqliteJournalMode::Wal);
            if let Some(t) = opts.busy_timeout {
                connect = connect.busy_timeout(t);
            }
        }

        let mut pool_opts = SqlitePoolOptions::new();
        if let Some(t) = opts.acquire_timeout {
            pool_opts = pool_opts.acquire_timeout(t);
        }
        pool_opts = if in_memory {
            pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_opts.max_connections(opts.max_conns.unwrap_or(10))
        };

        let pool = pool_opts.connect_with(connect).await?;
        let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
        tracing::debug!(dsn, in_memory, "SQLite pool ready");

        Ok(Self {
            pool,
            dsn: dsn.to_string(),
            in_memory,
            sea,
        })
    }

    /// Graceful pool close. (Dropping the pool also closes it; this just makes it explicit.)
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Get the DSN used for this connection.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    pub fn sqlx_sqlite(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }
}
