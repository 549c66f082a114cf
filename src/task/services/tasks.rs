//! Service layer for task creation, mutation, and listing.

use crate::task::{
    domain::{NewTask, Priority, Task, TaskDomainError, TaskId, TaskText, TaskView},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    text: String,
    due_date: Option<DateTime<Utc>>,
    priority: String,
}

impl CreateTaskRequest {
    /// Creates a request with the given text and priority and no due date.
    #[must_use]
    pub fn new(text: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            due_date: None,
            priority: priority.into(),
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Partial edit applied to an existing task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    text: Option<String>,
    due_date: Option<Option<DateTime<Utc>>>,
    priority: Option<String>,
}

impl TaskEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the task text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replaces the due date; `None` clears it.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` when the operation targeted a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores an incomplete task stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for blank text, or
    /// [`TaskServiceError::Repository`] when the store rejects the insert.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let text = TaskText::new(request.text)?;
        let draft = NewTask::new(
            text,
            request.due_date,
            Priority::new(request.priority),
            &*self.clock,
        );
        let task = self.repository.store(&draft).await?;
        tracing::debug!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Flips the completion flag of a task and persists it.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task does not exist.
    pub async fn toggle_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.repository.get_by_id(id).await?;
        task.toggle_completed(&*self.clock);
        self.repository.update(&task).await?;
        tracing::debug!(task_id = %id, completed = task.is_completed(), "toggled task");
        Ok(task)
    }

    /// Refreshes the update timestamp of `task` and persists every field.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task does not exist.
    pub async fn update_task(&self, mut task: Task) -> TaskServiceResult<Task> {
        task.touch(&*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Applies a partial edit to a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the new text is blank, or a
    /// repository error when the task does not exist or cannot be saved.
    pub async fn edit_task(&self, id: TaskId, edit: TaskEdit) -> TaskServiceResult<Task> {
        let mut task = self.repository.get_by_id(id).await?;
        if let Some(text) = edit.text {
            task.set_text(TaskText::new(text)?);
        }
        if let Some(due_date) = edit.due_date {
            task.set_due_date(due_date);
        }
        if let Some(priority) = edit.priority {
            task.set_priority(Priority::new(priority));
        }
        self.update_task(task).await
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_all_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns the tasks visible in `view`, evaluated at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, view: &TaskView) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.list_all().await?;
        Ok(view.apply(tasks, self.clock.utc()))
    }

    /// Returns the identifier following the current maximum.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn next_id(&self) -> TaskServiceResult<TaskId> {
        Ok(self.repository.next_id().await?)
    }
}
