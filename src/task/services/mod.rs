//! Application services for task orchestration.

mod tasks;

pub use tasks::{
    CreateTaskRequest, TaskEdit, TaskService, TaskServiceError, TaskServiceResult,
};
