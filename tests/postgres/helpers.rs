//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::EmbeddedCluster;
use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::config::{AppConfig, DatabaseConfig, PoolConfig};
use taskdesk::storage::{self, PgPool};

/// Provides a [`DefaultClock`] for test fixtures.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Pool settings suited to short-lived test databases.
pub const fn test_pool_config() -> PoolConfig {
    PoolConfig {
        max_size: 2,
        min_idle: 0,
        max_lifetime_secs: 60,
        connection_timeout_secs: 10,
        connect_attempts: 3,
        retry_delay_millis: 100,
    }
}

/// Configuration pointing at a fresh, empty database on the shared cluster.
pub fn fresh_config(cluster: &EmbeddedCluster, prefix: &str) -> Result<AppConfig, BoxError> {
    let dbname = cluster.create_unique_database(prefix)?;
    Ok(AppConfig {
        database: DatabaseConfig {
            host: cluster.host().to_owned(),
            port: cluster.port(),
            user: cluster.username().to_owned(),
            password: cluster.password().to_owned(),
            dbname,
        },
        pool: test_pool_config(),
    })
}

/// Opens a pool on a fresh database with the schema bootstrapped.
pub async fn fresh_pool(cluster: &EmbeddedCluster, prefix: &str) -> Result<PgPool, BoxError> {
    let config = fresh_config(cluster, prefix)?;
    Ok(storage::open(&config).await?)
}
