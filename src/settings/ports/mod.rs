//! Port contracts for application settings.

pub mod repository;

pub use repository::{SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult};
