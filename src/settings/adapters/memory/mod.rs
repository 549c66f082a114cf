//! In-memory adapters for application settings.

mod settings;

pub use settings::InMemorySettingsRepository;
