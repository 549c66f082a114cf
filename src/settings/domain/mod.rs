//! Domain model for the global application preferences record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of the settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsId(i32);

impl SettingsId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SettingsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global application preferences.
///
/// Exactly one settings row exists per store; it is created on first access
/// with every preference at its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    id: SettingsId,
    dark_mode: bool,
}

impl Settings {
    /// Reconstructs settings from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: SettingsId, dark_mode: bool) -> Self {
        Self { id, dark_mode }
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> SettingsId {
        self.id
    }

    /// Returns whether the dark theme is enabled.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Enables or disables the dark theme.
    pub const fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }
}
