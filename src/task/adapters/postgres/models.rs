//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Serial task identifier.
    pub id: i32,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: Option<bool>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
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
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row changeset for task updates.
///
/// `None` due dates are written as NULL so a cleared due date persists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
