//! Application service for reading and changing preferences.

use crate::settings::{
    domain::Settings,
    ports::{SettingsRepository, SettingsRepositoryError},
};
use std::sync::Arc;

/// Result type for settings service operations.
pub type SettingsServiceResult<T> = Result<T, SettingsRepositoryError>;

/// Preferences service.
#[derive(Clone)]
pub struct SettingsService<R>
where
    R: SettingsRepository,
{
    repository: Arc<R>,
}

impl<R> SettingsService<R>
where
    R: SettingsRepository,
{
    /// Creates a new settings service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the settings row, creating the default row on first access.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup or the insert fails.
    pub async fn settings(&self) -> SettingsServiceResult<Settings> {
        self.repository.get_or_create().await
    }

    /// Returns whether the dark theme is enabled.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn dark_mode(&self) -> SettingsServiceResult<bool> {
        Ok(self.settings().await?.dark_mode())
    }

    /// Persists the dark theme flag and returns the stored settings.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup or the update fails.
    pub async fn set_dark_mode(&self, enabled: bool) -> SettingsServiceResult<Settings> {
        let mut settings = self.settings().await?;
        settings.set_dark_mode(enabled);
        self.repository.update(&settings).await?;
        tracing::debug!(dark_mode = enabled, "updated dark mode");
        Ok(settings)
    }
}
