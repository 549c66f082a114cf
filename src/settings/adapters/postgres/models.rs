//! Diesel row models for the settings table.

use super::schema::settings;
use diesel::prelude::*;

/// Query result row for the settings table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettingsRow {
    /// Serial row identifier.
    pub id: i32,
    /// Dark theme flag.
    pub dark_mode: Option<bool>,
}
