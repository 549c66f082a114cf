//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its storage-assigned identifier.
    ///
    /// Identifier assignment and insertion happen in one step, so concurrent
    /// writers cannot receive the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects the
    /// insert.
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Overwrites every mutable column of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every task, newest first.
    ///
    /// Tasks created at the same instant are ordered by descending identifier.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one more than the largest stored identifier, or
    /// [`TaskId::FIRST`] when the store is empty.
    ///
    /// The value is advisory: it is not reserved and task creation does not
    /// use it.
    async fn next_id(&self) -> TaskRepositoryResult<TaskId>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for [`TaskRepositoryError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
