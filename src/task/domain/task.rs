//! Task aggregate root and the unsaved task draft.

use super::{Priority, TaskId, TaskText};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task that has not been stored yet.
///
/// The storage engine assigns the identifier when the draft is stored, so a
/// draft carries everything except the id. Drafts always start incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    text: TaskText,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        text: TaskText,
        due_date: Option<DateTime<Utc>>,
        priority: Priority,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            text,
            due_date,
            priority,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the optional due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority label.
    #[must_use]
    pub const fn priority(&self) -> &Priority {
        &self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the initial update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Attaches the storage-assigned identifier, producing a stored task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            text: self.text,
            completed: false,
            due_date: self.due_date,
            priority: self.priority,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: TaskText,
    completed: bool,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task text.
    pub text: TaskText,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted priority label.
    pub priority: Priority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            due_date: data.due_date,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the optional due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority label.
    #[must_use]
    pub const fn priority(&self) -> &Priority {
        &self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Flips the completion flag and refreshes the update timestamp.
    pub fn toggle_completed(&mut self, clock: &impl Clock) {
        self.completed = !self.completed;
        self.touch(clock);
    }

    /// Replaces the task text.
    pub fn set_text(&mut self, text: TaskText) {
        self.text = text;
    }

    /// Replaces or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    /// Replaces the priority label.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
