//! Idempotent schema bootstrap.
//!
//! Tables are created only when missing and existing columns are never
//! altered. The settings row is seeded in the same transaction, so a failed
//! bootstrap leaves the database untouched.

use super::{PgPool, StorageResult};
use diesel::pg::PgConnection;
use diesel::prelude::*;

const CREATE_TASKS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id SERIAL PRIMARY KEY, ",
    "text TEXT NOT NULL, ",
    "completed BOOLEAN DEFAULT FALSE, ",
    "due_date TIMESTAMPTZ, ",
    "priority TEXT, ",
    "created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP, ",
    "updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP",
    ")",
);

const CREATE_SETTINGS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS settings (",
    "id SERIAL PRIMARY KEY, ",
    "dark_mode BOOLEAN DEFAULT FALSE",
    ")",
);

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

/// Creates missing tables and seeds the settings row in one transaction.
///
/// Safe to run on every start.
///
/// # Errors
///
/// Returns [`super::StorageError::Query`] when any statement fails; the
/// transaction is rolled back.
pub fn bootstrap(connection: &mut PgConnection) -> StorageResult<()> {
    let seeded = connection.transaction::<_, diesel::result::Error, _>(|tx| {
        diesel::sql_query(CREATE_TASKS_TABLE).execute(tx)?;
        diesel::sql_query(CREATE_SETTINGS_TABLE).execute(tx)?;

        let existing = diesel::sql_query("SELECT COUNT(*) AS count FROM settings")
            .get_result::<CountRow>(tx)?;
        if existing.count > 0 {
            return Ok(false);
        }
        diesel::sql_query("INSERT INTO settings (dark_mode) VALUES (FALSE)").execute(tx)?;
        Ok(true)
    })?;

    tracing::info!(seeded_settings = seeded, "database schema ready");
    Ok(())
}

/// Runs [`bootstrap`] on a connection checked out from `pool`.
///
/// # Errors
///
/// Returns [`super::StorageError::Pool`] when no connection is available, or
/// the bootstrap error.
pub fn bootstrap_pool(pool: &PgPool) -> StorageResult<()> {
    let mut connection = pool.get()?;
    bootstrap(&mut connection)
}
