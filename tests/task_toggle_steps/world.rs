//! Shared world state for task toggle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::app::{TaskDeskApp, TaskPayload};
use taskdesk::settings::{
    adapters::memory::InMemorySettingsRepository, services::SettingsService,
};
use taskdesk::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};

/// Application type used by the BDD world.
pub type TestDesk = TaskDeskApp<InMemoryTaskRepository, InMemorySettingsRepository, DefaultClock>;

/// Scenario world for task toggle behaviour tests.
pub struct TaskDeskWorld {
    pub desk: TestDesk,
    pub last_added: Option<TaskPayload>,
    pub listed: Vec<TaskPayload>,
}

impl TaskDeskWorld {
    /// Creates a world backed by empty in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let desk = TaskDeskApp::new(
            TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            SettingsService::new(Arc::new(InMemorySettingsRepository::new())),
        );

        Self {
            desk,
            last_added: None,
            listed: Vec::new(),
        }
    }

    /// Returns the listed task with `id`.
    pub fn listed_task(&self, id: i32) -> Result<&TaskPayload, eyre::Report> {
        self.listed
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| eyre::eyre!("task {id} missing from the listed tasks"))
    }
}

impl Default for TaskDeskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskDeskWorld {
    TaskDeskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
