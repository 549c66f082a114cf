//! In-memory settings repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::settings::{
    domain::{Settings, SettingsId},
    ports::{SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult},
};

/// Thread-safe in-memory settings repository.
///
/// Starts without a settings row, like a freshly created table.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsRepository {
    state: Arc<RwLock<Option<Settings>>>,
}

impl InMemorySettingsRepository {
    /// Creates a repository with no settings row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl ToString) -> SettingsRepositoryError {
    SettingsRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_or_create(&self) -> SettingsRepositoryResult<Settings> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let settings = state.get_or_insert(Settings::from_persisted(SettingsId::new(1), false));
        Ok(*settings)
    }

    async fn update(&self, settings: &Settings) -> SettingsRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        match state.as_mut() {
            Some(existing) if existing.id() == settings.id() => {
                *existing = *settings;
                Ok(())
            }
            _ => Err(SettingsRepositoryError::NotFound(settings.id())),
        }
    }
}
