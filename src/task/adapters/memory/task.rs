//! In-memory repository for task tests and database-free shells.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers follow a serial counter that never hands out a value twice,
/// even after the task holding it is deleted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_assigned: i32,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let next = state.last_assigned.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task identifier overflow"))
        })?;
        state.last_assigned = next;

        let stored = task.clone().into_task(TaskId::new(next));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let existing = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *existing = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| (Reverse(task.created_at()), Reverse(task.id())));
        Ok(tasks)
    }

    async fn next_id(&self) -> TaskRepositoryResult<TaskId> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let Some(max) = state.tasks.keys().next_back() else {
            return Ok(TaskId::FIRST);
        };
        max.successor().ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task identifier overflow"))
        })
    }
}
