//! Application configuration loaded from a JSON file.
//!
//! The configuration directory holds `config.json`. When that file is absent
//! the committed template `config.example.json` is used instead, so a fresh
//! checkout runs against the example database. A primary file that exists but
//! does not parse is an error; it never silently falls back.
//!
//! ```json
//! {
//!   "database": {
//!     "host": "localhost",
//!     "port": 5432,
//!     "user": "postgres",
//!     "password": "postgres",
//!     "dbname": "taskdesk"
//!   },
//!   "pool": { "max_size": 10, "connect_attempts": 3 }
//! }
//! ```
//!
//! The `pool` section and each of its fields are optional.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Name of the primary configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the template used when the primary file is absent.
pub const EXAMPLE_CONFIG_FILE_NAME: &str = "config.example.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for [`AppConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Neither the primary file nor the template exists.
    #[error("no config.json or config.example.json in {dir}")]
    Missing {
        /// Directory that was searched.
        dir: Utf8PathBuf,
    },
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection parameters.
    pub database: DatabaseConfig,
    /// Connection pool tuning.
    #[serde(default)]
    pub pool: PoolConfig,
}

impl AppConfig {
    /// Loads configuration from `dir`, preferring [`CONFIG_FILE_NAME`] and
    /// falling back to [`EXAMPLE_CONFIG_FILE_NAME`] when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when neither file exists,
    /// [`ConfigError::Parse`] when the first file found is malformed, and
    /// [`ConfigError::Read`] for any other I/O failure.
    pub fn load_from_dir(dir: &Utf8Path) -> Result<Self, ConfigError> {
        let root = Dir::open_ambient_dir(dir, ambient_authority()).map_err(|source| {
            ConfigError::Read {
                path: dir.to_owned(),
                source,
            }
        })?;

        for file_name in [CONFIG_FILE_NAME, EXAMPLE_CONFIG_FILE_NAME] {
            let path = dir.join(file_name);
            match root.read_to_string(file_name) {
                Ok(contents) => {
                    tracing::info!(%path, "loading configuration");
                    return Self::parse(&contents, path);
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(%path, "configuration file absent");
                }
                Err(source) => return Err(ConfigError::Read { path, source }),
            }
        }

        Err(ConfigError::Missing {
            dir: dir.to_owned(),
        })
    }

    fn parse(contents: &str, path: Utf8PathBuf) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// `PostgreSQL` connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub dbname: String,
}

impl DatabaseConfig {
    /// Builds a libpq key/value connection string with TLS disabled.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            conninfo_value(&self.host),
            self.port,
            conninfo_value(&self.user),
            conninfo_value(&self.password),
            conninfo_value(&self.dbname),
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .finish()
    }
}

/// Quotes a conninfo value when libpq would otherwise split or misread it.
///
/// Values are wrapped in single quotes with embedded quotes and backslashes
/// escaped by a backslash.
fn conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '\'' || ch == '\\');
    if !needs_quotes {
        return value.to_owned();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Connection pool sizing and connectivity retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of open connections.
    pub max_size: u32,
    /// Number of idle connections the pool tries to keep.
    pub min_idle: u32,
    /// Lifetime of a pooled connection in seconds before it is recycled.
    pub max_lifetime_secs: u64,
    /// Seconds to wait for a connection before a checkout fails.
    pub connection_timeout_secs: u64,
    /// Connectivity checks performed at startup before giving up.
    pub connect_attempts: u32,
    /// Milliseconds to wait between connectivity checks.
    pub retry_delay_millis: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            min_idle: 5,
            max_lifetime_secs: 5,
            connection_timeout_secs: 5,
            connect_attempts: 3,
            retry_delay_millis: 1000,
        }
    }
}

impl PoolConfig {
    /// Returns the connection lifetime.
    #[must_use]
    pub const fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Returns the checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Returns the delay between connectivity checks.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_millis)
    }
}
