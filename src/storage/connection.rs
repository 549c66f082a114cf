//! Connection pool construction with a startup connectivity check.

use super::{PgPool, StorageError, StorageResult};
use crate::config::{DatabaseConfig, PoolConfig};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;

/// Builds a bounded connection pool and waits until the server answers.
///
/// The pool is created without opening connections. A `SELECT 1` round trip
/// is then attempted up to `connect_attempts` times, sleeping `retry_delay`
/// between attempts. This blocks the calling thread.
///
/// # Errors
///
/// Returns [`StorageError::Unreachable`] carrying the last failure when no
/// attempt succeeds.
pub fn connect(database: &DatabaseConfig, settings: &PoolConfig) -> StorageResult<PgPool> {
    tracing::info!(
        host = %database.host,
        port = database.port,
        dbname = %database.dbname,
        user = %database.user,
        "connecting to database"
    );

    let manager = ConnectionManager::<PgConnection>::new(database.connection_string());
    let max_size = settings.max_size.max(1);
    let max_lifetime = Some(settings.max_lifetime()).filter(|lifetime| !lifetime.is_zero());
    let pool = Pool::builder()
        .max_size(max_size)
        .min_idle(Some(settings.min_idle.min(max_size)))
        .max_lifetime(max_lifetime)
        .connection_timeout(settings.connection_timeout().max(Duration::from_millis(1)))
        .build_unchecked(manager);

    wait_until_reachable(&pool, settings)?;
    tracing::info!("database connection established");
    Ok(pool)
}

fn wait_until_reachable(pool: &PgPool, settings: &PoolConfig) -> StorageResult<()> {
    let attempts = settings.connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        match ping(pool) {
            Ok(()) => return Ok(()),
            Err(err) if attempt >= attempts => {
                return Err(StorageError::Unreachable {
                    attempts,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                tracing::warn!(attempt, attempts, error = %err, "database connectivity check failed");
                std::thread::sleep(settings.retry_delay());
                attempt += 1;
            }
        }
    }
}

fn ping(pool: &PgPool) -> StorageResult<()> {
    let mut connection = pool.get()?;
    diesel::sql_query("SELECT 1").execute(&mut connection)?;
    Ok(())
}
