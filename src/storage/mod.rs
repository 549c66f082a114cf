//! `PostgreSQL` connectivity and schema bootstrap.
//!
//! [`open`] is the startup entry point: it builds the pool, waits for the
//! server, and bootstraps the schema on tokio's blocking pool.

mod bootstrap;
mod connection;

pub use bootstrap::{bootstrap, bootstrap_pool};
pub use connection::connect;

use crate::config::AppConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every repository.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Result type for storage setup operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while connecting to or bootstrapping the database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A statement failed.
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// Every startup connectivity check failed.
    #[error("database unreachable after {attempts} attempts: {source}")]
    Unreachable {
        /// Number of checks performed.
        attempts: u32,
        /// Failure of the last check.
        #[source]
        source: Box<StorageError>,
    },

    /// The blocking setup task panicked or was cancelled.
    #[error("storage setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Connects to the configured database and bootstraps its schema.
///
/// # Errors
///
/// Returns [`StorageError`] when the server stays unreachable or the
/// bootstrap transaction fails.
pub async fn open(config: &AppConfig) -> StorageResult<PgPool> {
    let database = config.database.clone();
    let settings = config.pool;
    tokio::task::spawn_blocking(move || {
        let pool = connect(&database, &settings)?;
        bootstrap_pool(&pool)?;
        Ok(pool)
    })
    .await?
}
