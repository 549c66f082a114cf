//! Repository port for the settings record.

use crate::settings::domain::{Settings, SettingsId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for settings repository operations.
pub type SettingsRepositoryResult<T> = Result<T, SettingsRepositoryError>;

/// Settings persistence contract.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the settings row, creating a default one first if none exists.
    ///
    /// Repeated calls return the same row.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsRepositoryError::Persistence`] when the lookup or the
    /// insert fails.
    async fn get_or_create(&self) -> SettingsRepositoryResult<Settings>;

    /// Overwrites the stored preferences of the identified row.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsRepositoryError::NotFound`] when the row does not
    /// exist.
    async fn update(&self, settings: &Settings) -> SettingsRepositoryResult<()>;
}

/// Errors returned by settings repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingsRepositoryError {
    /// The settings row was not found.
    #[error("settings not found: {0}")]
    NotFound(SettingsId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
