//! Domain model for task management.
//!
//! Tasks carry free text, an optional due date, a priority label, and a
//! binary completion flag. Identifiers come from the storage engine, so the
//! domain distinguishes an unsaved [`NewTask`] from a stored [`Task`].

mod error;
mod ids;
mod task;
mod view;

pub use error::TaskDomainError;
pub use ids::{Priority, TaskId, TaskText};
pub use task::{NewTask, PersistedTaskData, Task};
pub use view::{DueFilter, StatusFilter, TaskSort, TaskView};
