//! `PostgreSQL` task repository behaviour.

use super::helpers::{BoxError, PostgresCluster, clock, fresh_pool, postgres_cluster};
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskdesk::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{NewTask, Priority, TaskId, TaskText},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskService},
};

fn draft(text: &str, priority: &str, clock: &DefaultClock) -> Result<NewTask, BoxError> {
    Ok(NewTask::new(
        TaskText::new(text)?,
        None,
        Priority::new(priority),
        clock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_assigns_serial_ids_and_round_trips(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let repository = PostgresTaskRepository::new(fresh_pool(cluster, "task_store").await?);

    let first = repository.store(&draft("Buy milk", "low", &clock)?).await?;
    let second = repository.store(&draft("Walk dog", "high", &clock)?).await?;
    let fetched = repository.get_by_id(second.id()).await?;

    assert_eq!(first.id(), TaskId::FIRST);
    assert_eq!(second.id(), TaskId::new(2));
    assert!(!fetched.is_completed());
    assert_eq!(fetched.text().as_str(), "Walk dog");
    assert_eq!(fetched.priority().as_str(), "high");
    assert_eq!(fetched.due_date(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_rows_report_not_found(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let repository = PostgresTaskRepository::new(fresh_pool(cluster, "task_missing").await?);
    let ghost = draft("Ghost", "low", &clock)?.into_task(TaskId::new(404));

    assert!(matches!(
        repository.get_by_id(TaskId::new(404)).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repository.update(&ghost).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repository.delete(TaskId::new(404)).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_toggle_and_delete_persist(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let service = TaskService::new(
        Arc::new(PostgresTaskRepository::new(
            fresh_pool(cluster, "task_service").await?,
        )),
        Arc::new(clock),
    );

    let created = service
        .create_task(CreateTaskRequest::new("Buy milk", "low"))
        .await?;
    let toggled = service.toggle_task(created.id()).await?;
    let stored = service.get_task(created.id()).await?;
    assert!(toggled.is_completed());
    assert!(stored.is_completed());
    assert!(stored.updated_at() >= created.updated_at());

    service.delete_task(created.id()).await?;
    let remaining = service.get_all_tasks().await?;
    assert!(remaining.is_empty());
    assert!(
        service
            .delete_task(created.id())
            .await
            .is_err_and(|err| err.is_not_found())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_all_orders_newest_first(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let repository = PostgresTaskRepository::new(fresh_pool(cluster, "task_order").await?);
    for text in ["t1", "t2", "t3"] {
        repository.store(&draft(text, "medium", &clock)?).await?;
    }

    let texts: Vec<String> = repository
        .list_all()
        .await?
        .iter()
        .map(|task| task.text().as_str().to_owned())
        .collect();

    assert_eq!(texts, vec!["t3", "t2", "t1"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn next_id_is_one_then_max_plus_one(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let repository = PostgresTaskRepository::new(fresh_pool(cluster, "task_next_id").await?);

    assert_eq!(repository.next_id().await?, TaskId::FIRST);

    repository.store(&draft("one", "low", &clock)?).await?;
    let second = repository.store(&draft("two", "low", &clock)?).await?;
    assert_eq!(repository.next_id().await?, TaskId::new(3));

    repository.delete(second.id()).await?;
    assert_eq!(repository.next_id().await?, TaskId::new(2));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rows_from_other_clients_are_read_as_stored(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let pool = fresh_pool(cluster, "task_raw_rows").await?;
    {
        let mut connection = pool.get()?;
        diesel::sql_query(concat!(
            "INSERT INTO tasks (text, priority, created_at) VALUES ",
            "('', 'low', '2024-03-01T09:00:00Z'), ",
            "(' x ', ' High ', '2024-03-01T10:00:00Z')",
        ))
        .execute(&mut connection)?;
    }
    let service = TaskService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(clock),
    );

    let listed = service.get_all_tasks().await?;
    let stored: Vec<(&str, &str)> = listed
        .iter()
        .map(|task| (task.text().as_str(), task.priority().as_str()))
        .collect();
    assert_eq!(stored, vec![(" x ", " High "), ("", "low")]);

    let padded = listed
        .iter()
        .find(|task| task.text().as_str() == " x ")
        .ok_or("padded row missing")?;
    service.toggle_task(padded.id()).await?;
    let reread = PostgresTaskRepository::new(pool).get_by_id(padded.id()).await?;
    assert!(reread.is_completed());
    assert_eq!(reread.text().as_str(), " x ");
    assert_eq!(reread.priority().as_str(), " High ");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn next_id_after_the_largest_identifier_is_an_error(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let cluster = postgres_cluster;
    let pool = fresh_pool(cluster, "task_id_overflow").await?;
    {
        let mut connection = pool.get()?;
        diesel::sql_query("INSERT INTO tasks (id, text) VALUES (2147483647, 'last')")
            .execute(&mut connection)?;
    }
    let repository = PostgresTaskRepository::new(pool);

    assert!(matches!(
        repository.next_id().await,
        Err(TaskRepositoryError::Persistence(_))
    ));
    assert_eq!(
        repository.get_by_id(TaskId::new(i32::MAX)).await?.text().as_str(),
        "last"
    );
    Ok(())
}
