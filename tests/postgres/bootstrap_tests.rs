//! Connection and schema bootstrap behaviour.

use super::helpers::{BoxError, PostgresCluster, fresh_config, postgres_cluster, test_pool_config};
use diesel::prelude::*;
use rstest::rstest;
use taskdesk::app;
use taskdesk::config::{DatabaseConfig, PoolConfig};
use taskdesk::storage::{self, StorageError};

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

fn count(connection: &mut PgConnection, sql: &str) -> Result<i64, BoxError> {
    Ok(diesel::sql_query(sql).get_result::<CountRow>(connection)?.count)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_is_idempotent(postgres_cluster: PostgresCluster) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let config = fresh_config(cluster, "bootstrap_twice")?;
    let pool = storage::open(&config).await?;
    let mut connection = pool.get()?;

    diesel::sql_query("INSERT INTO tasks (text, priority) VALUES ('kept', 'low')")
        .execute(&mut connection)?;
    storage::bootstrap(&mut connection)?;
    storage::bootstrap(&mut connection)?;

    assert_eq!(
        count(&mut connection, "SELECT COUNT(*) AS count FROM settings")?,
        1
    );
    assert_eq!(
        count(&mut connection, "SELECT COUNT(*) AS count FROM tasks")?,
        1
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_bootstrap_leaves_no_tables_behind(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let config = fresh_config(cluster, "bootstrap_rollback")?;
    let pool = storage::connect(&config.database, &config.pool)?;
    let mut connection = pool.get()?;
    diesel::sql_query("CREATE VIEW settings AS SELECT 1 AS id, FALSE AS dark_mode WHERE FALSE")
        .execute(&mut connection)?;

    let result = storage::bootstrap(&mut connection);

    assert!(matches!(result, Err(StorageError::Query(_))));
    assert_eq!(
        count(
            &mut connection,
            "SELECT COUNT(*) AS count FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name = 'tasks'",
        )?,
        0
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_rows_with_null_columns_read_as_defaults(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let config = fresh_config(cluster, "bootstrap_nulls")?;
    let desk = app::bootstrap(&config).await?;
    let pool = storage::connect(&config.database, &config.pool)?;
    let mut connection = pool.get()?;
    diesel::sql_query(
        "INSERT INTO tasks (text, completed, priority) VALUES ('legacy', NULL, NULL)",
    )
    .execute(&mut connection)?;

    let listed = desk.list_tasks().await;

    assert_eq!(listed.len(), 1);
    assert!(listed.iter().all(|task| !task.completed && task.priority.is_empty()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrapped_app_runs_the_buy_milk_flow(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let desk = app::bootstrap(&fresh_config(cluster, "bootstrap_app")?).await?;

    let created = desk.add_task("Buy milk", None, "low").await;
    assert_eq!(created.id, 1);
    assert!(!created.completed);

    let toggled = desk.toggle_task(created.id).await;
    assert!(toggled.iter().any(|task| task.id == created.id && task.completed));

    let restored = desk.toggle_task(created.id).await;
    assert!(restored.iter().any(|task| task.id == created.id && !task.completed));

    assert!(desk.delete_task(created.id).await.is_empty());
    assert!(desk.set_dark_mode(true).await);
    assert!(desk.get_dark_mode().await);
    Ok(())
}

#[rstest]
fn unreachable_server_fails_after_configured_attempts() {
    let database = DatabaseConfig {
        host: "127.0.0.1".to_owned(),
        port: 1,
        user: "nobody".to_owned(),
        password: "nothing".to_owned(),
        dbname: "missing".to_owned(),
    };
    let settings = PoolConfig {
        connect_attempts: 2,
        connection_timeout_secs: 1,
        retry_delay_millis: 10,
        ..test_pool_config()
    };

    let result = storage::connect(&database, &settings);

    assert!(matches!(
        result,
        Err(StorageError::Unreachable { attempts: 2, .. })
    ));
}
