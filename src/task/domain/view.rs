//! Filtering and ordering of task lists for presentation.

use super::Task;
use chrono::{DateTime, Duration, Local, Utc};
use std::cmp::Reverse;

/// Completion-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks that are not completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl StatusFilter {
    /// Returns whether the task passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

/// Due-date filter.
///
/// Every variant except [`DueFilter::All`] rejects tasks without a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DueFilter {
    /// Every task.
    #[default]
    All,
    /// Due on the current local calendar day.
    Today,
    /// Due between now and seven days from now, inclusive.
    Week,
    /// Due before now and not completed.
    Overdue,
}

impl DueFilter {
    /// Returns whether the task passes this filter at `now`.
    #[must_use]
    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        if self == Self::All {
            return true;
        }
        let Some(due) = task.due_date() else {
            return false;
        };
        match self {
            Self::All => true,
            Self::Today => {
                due.with_timezone(&Local).date_naive() == now.with_timezone(&Local).date_naive()
            }
            Self::Week => due >= now && due <= now + Duration::days(7),
            Self::Overdue => due < now && !task.is_completed(),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSort {
    /// Newest first.
    #[default]
    CreatedDesc,
    /// Oldest first.
    CreatedAsc,
    /// Highest priority rank first; ties keep their incoming order.
    Priority,
}

/// Filter and sort settings for a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskView {
    /// Completion-status filter.
    pub status: StatusFilter,
    /// Due-date filter.
    pub due: DueFilter,
    /// Result ordering.
    pub sort: TaskSort,
}

impl TaskView {
    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the due-date filter.
    #[must_use]
    pub const fn with_due(mut self, due: DueFilter) -> Self {
        self.due = due;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    /// Filters and orders `tasks` as seen at `now`.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<Task> {
        let mut visible: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.status.matches(task) && self.due.matches(task, now))
            .collect();

        match self.sort {
            TaskSort::CreatedDesc => visible.sort_by_key(|task| Reverse(task.created_at())),
            TaskSort::CreatedAsc => visible.sort_by_key(Task::created_at),
            TaskSort::Priority => visible.sort_by_key(|task| Reverse(task.priority().rank())),
        }
        visible
    }
}
