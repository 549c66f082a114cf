//! `PostgreSQL` adapters for application settings.

mod models;
mod repository;
mod schema;

pub use repository::PostgresSettingsRepository;
