//! Front-end command boundary.
//!
//! [`TaskDeskApp`] is what a UI binds to. Every entry point returns plain data:
//! failures from the services are logged with `tracing::error!` and replaced
//! by an empty or default value, so raw errors never reach the caller.
//! [`bootstrap`] wires the `PostgreSQL` application once at startup.

use crate::config::{AppConfig, ConfigError};
use crate::settings::{
    adapters::postgres::PostgresSettingsRepository, ports::SettingsRepository,
    services::SettingsService,
};
use crate::storage::{self, PgPool, StorageError};
use crate::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskId, TaskView},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskEdit, TaskService},
};
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;

/// Flat task record handed to front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Task identifier; `0` marks the zero-value payload.
    pub id: i32,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            text: task.text().as_str().to_owned(),
            completed: task.is_completed(),
            due_date: task.due_date(),
            priority: task.priority().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

fn payloads(tasks: &[Task]) -> Vec<TaskPayload> {
    tasks.iter().map(TaskPayload::from).collect()
}

fn logged<T, E: Display>(result: Result<T, E>, operation: &'static str) -> Option<T> {
    result
        .inspect_err(|err| tracing::error!(operation, error = %err, "operation failed"))
        .ok()
}

/// Application facade exposing masked entry points.
#[derive(Clone)]
pub struct TaskDeskApp<TR, SR, C>
where
    TR: TaskRepository,
    SR: SettingsRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<TR, C>,
    settings: SettingsService<SR>,
}

impl<TR, SR, C> TaskDeskApp<TR, SR, C>
where
    TR: TaskRepository,
    SR: SettingsRepository,
    C: Clock + Send + Sync,
{
    /// Creates the facade over already constructed services.
    #[must_use]
    pub const fn new(tasks: TaskService<TR, C>, settings: SettingsService<SR>) -> Self {
        Self { tasks, settings }
    }

    /// Creates a task. Returns the zero-value payload on failure.
    pub async fn add_task(
        &self,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        priority: &str,
    ) -> TaskPayload {
        let request = CreateTaskRequest::new(text, priority).with_due_date(due_date);
        logged(self.tasks.create_task(request).await, "add_task")
            .map(|task| TaskPayload::from(&task))
            .unwrap_or_default()
    }

    /// Lists every task, newest first. Returns an empty list on failure.
    pub async fn list_tasks(&self) -> Vec<TaskPayload> {
        logged(self.tasks.get_all_tasks().await, "list_tasks")
            .map(|tasks| payloads(&tasks))
            .unwrap_or_default()
    }

    /// Lists the tasks visible in `view`. Returns an empty list on failure.
    pub async fn list_tasks_in_view(&self, view: &TaskView) -> Vec<TaskPayload> {
        logged(self.tasks.list_tasks(view).await, "list_tasks_in_view")
            .map(|tasks| payloads(&tasks))
            .unwrap_or_default()
    }

    /// Toggles a task and returns the refreshed list.
    ///
    /// A failed toggle is logged and the list is still returned.
    pub async fn toggle_task(&self, id: i32) -> Vec<TaskPayload> {
        logged(self.tasks.toggle_task(TaskId::new(id)).await, "toggle_task");
        self.list_tasks().await
    }

    /// Applies a partial edit. Returns the zero-value payload on failure.
    pub async fn edit_task(&self, id: i32, edit: TaskEdit) -> TaskPayload {
        logged(self.tasks.edit_task(TaskId::new(id), edit).await, "edit_task")
            .map(|task| TaskPayload::from(&task))
            .unwrap_or_default()
    }

    /// Deletes a task and returns the refreshed list.
    pub async fn delete_task(&self, id: i32) -> Vec<TaskPayload> {
        logged(self.tasks.delete_task(TaskId::new(id)).await, "delete_task");
        self.list_tasks().await
    }

    /// Returns the dark mode flag, or `false` on failure.
    pub async fn get_dark_mode(&self) -> bool {
        logged(self.settings.dark_mode().await, "get_dark_mode").unwrap_or(false)
    }

    /// Persists the dark mode flag and returns the stored value.
    ///
    /// When persistence fails the requested value is returned unchanged.
    pub async fn set_dark_mode(&self, enabled: bool) -> bool {
        logged(self.settings.set_dark_mode(enabled).await, "set_dark_mode")
            .map_or(enabled, |settings| settings.dark_mode())
    }
}

/// Application backed by `PostgreSQL` and the system clock.
pub type PostgresApp = TaskDeskApp<PostgresTaskRepository, PostgresSettingsRepository, DefaultClock>;

impl PostgresApp {
    /// Wires repositories and services over an open pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let tasks = TaskService::new(
            Arc::new(PostgresTaskRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        );
        let settings = SettingsService::new(Arc::new(PostgresSettingsRepository::new(pool)));
        Self::new(tasks, settings)
    }
}

/// Errors that abort application startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The database could not be reached or prepared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Connects, bootstraps the schema, and builds the application.
///
/// # Errors
///
/// Returns [`BootstrapError::Storage`] when the database is unreachable or
/// the schema bootstrap fails.
pub async fn bootstrap(config: &AppConfig) -> Result<PostgresApp, BootstrapError> {
    let pool = storage::open(config).await?;
    tracing::info!("application ready");
    Ok(PostgresApp::from_pool(pool))
}

/// Loads configuration from `dir` and runs [`bootstrap`].
///
/// # Errors
///
/// Returns [`BootstrapError::Config`] when no usable configuration file is
/// found, or the storage error from [`bootstrap`].
pub async fn bootstrap_from_dir(dir: &Utf8Path) -> Result<PostgresApp, BootstrapError> {
    let config = AppConfig::load_from_dir(dir)?;
    bootstrap(&config).await
}
