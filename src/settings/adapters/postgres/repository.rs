//! `PostgreSQL` repository implementation for the settings record.

use super::{models::SettingsRow, schema::settings};
use crate::settings::{
    domain::{Settings, SettingsId},
    ports::{SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult},
};
use crate::storage::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed settings repository.
#[derive(Debug, Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SettingsRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SettingsRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SettingsRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SettingsRepositoryError::persistence)?
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get_or_create(&self) -> SettingsRepositoryResult<Settings> {
        self.run_blocking(move |connection| {
            let row = connection
                .transaction::<_, diesel::result::Error, _>(|tx| {
                    let existing = settings::table
                        .order(settings::id.asc())
                        .select(SettingsRow::as_select())
                        .first::<SettingsRow>(tx)
                        .optional()?;
                    if let Some(row) = existing {
                        return Ok(row);
                    }

                    tracing::info!("settings row missing, creating default");
                    diesel::insert_into(settings::table)
                        .values(settings::dark_mode.eq(false))
                        .returning(SettingsRow::as_returning())
                        .get_result::<SettingsRow>(tx)
                })
                .map_err(SettingsRepositoryError::persistence)?;
            Ok(row_to_settings(row))
        })
        .await
    }

    async fn update(&self, preferences: &Settings) -> SettingsRepositoryResult<()> {
        let settings_id = preferences.id();
        let dark_mode = preferences.dark_mode();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(settings::table.find(settings_id.value()))
                .set(settings::dark_mode.eq(dark_mode))
                .execute(connection)
                .map_err(SettingsRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(SettingsRepositoryError::NotFound(settings_id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_settings(row: SettingsRow) -> Settings {
    Settings::from_persisted(SettingsId::new(row.id), row.dark_mode.unwrap_or(false))
}
