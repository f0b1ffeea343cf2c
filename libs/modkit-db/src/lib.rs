//! Database access helpers shared by EventHub modules.
//!
//! Wraps a SeaORM [`DatabaseConnection`] together with the engine it talks
//! to, normalizes SQLite DSNs and classifies driver errors so repositories
//! can tell constraint violations apart from infrastructure failures.
//!
//! ```rust,no_run
//! # async fn demo() -> modkit_db::Result<()> {
//! use modkit_db::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! # let _ = conn;
//! # Ok(())
//! # }
//! ```

pub mod dsn;
pub mod errors;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;

pub use dsn::{absolutize_sqlite_dsn, is_sqlite_memory_dsn, redact_credentials_in_dsn};
pub use errors::is_unique_violation;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sea(#[from] DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Pool knobs applied on connect.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    pub acquire_timeout: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    /// Log every statement through `tracing` at debug level.
    pub sql_logging: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            sql_logging: false,
        }
    }
}

/// A connected database: engine + SeaORM connection (a cheap-to-clone pool handle).
#[derive(Clone, Debug)]
pub struct DbHandle {
    engine: DbEngine,
    conn: DatabaseConnection,
    dsn: String,
}

impl DbHandle {
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let scheme = dsn.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" | "sqlite3" => Ok(DbEngine::Sqlite),
            "postgres" | "postgresql" => Ok(DbEngine::Postgres),
            _ => Err(DbError::UnknownDsn(redact_credentials_in_dsn(dsn))),
        }
    }

    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;

        let mut o = ConnectOptions::new(dsn.to_owned());
        // Every pooled connection to an in-memory SQLite DSN is a separate database.
        let max_conns = if engine == DbEngine::Sqlite && is_sqlite_memory_dsn(dsn) {
            Some(1)
        } else {
            opts.max_conns
        };
        if let Some(n) = max_conns {
            o.max_connections(n);
        }
        if let Some(n) = opts.min_conns {
            o.min_connections(n);
        }
        if let Some(t) = opts.acquire_timeout {
            o.acquire_timeout(t);
        }
        if let Some(t) = opts.idle_timeout {
            o.idle_timeout(t);
        }
        o.sqlx_logging(opts.sql_logging);

        tracing::debug!(dsn = %redact_credentials_in_dsn(dsn), ?engine, "connecting to database");
        let conn = Database::connect(o).await?;

        Ok(Self {
            engine,
            conn,
            dsn: dsn.to_owned(),
        })
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection handle.
    pub fn sea(&self) -> DatabaseConnection {
        self.conn.clone()
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
