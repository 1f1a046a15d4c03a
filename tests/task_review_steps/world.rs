//! Shared world state for task review BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::fixture;
use scriptorium::content::domain::GeneratedContent;
use scriptorium::gateway::{
    adapters::{PlaceholderImageGenerator, ScriptedTextGenerator},
    services::AiGateway,
};
use scriptorium::generation::services::ContentGenerationService;
use scriptorium::operation::{OperationError, OperationRunner};
use scriptorium::task::{
    adapters::memory::InMemoryTaskStore,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use scriptorium::template::{
    adapters::memory::InMemoryTemplateRepository, services::TemplateService,
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskStore, DefaultClock>;

/// Generation service type used by the BDD world.
pub type TestGenerationService = ContentGenerationService<
    InMemoryTaskStore,
    DefaultClock,
    ScriptedTextGenerator,
    PlaceholderImageGenerator,
    InMemoryTemplateRepository,
>;

/// Scenario world for task review behaviour tests.
pub struct TaskReviewWorld {
    pub generator: ScriptedTextGenerator,
    pub tasks: Arc<TestTaskService>,
    pub task: Option<Task>,
    pub content: Option<GeneratedContent>,
    pub operation_error: Option<OperationError>,
    pub review_error: Option<TaskLifecycleError>,
}

impl TaskReviewWorld {
    /// Creates a world with an empty task store and a silent provider.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(TaskLifecycleService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(DefaultClock),
        ));
        Self {
            generator: ScriptedTextGenerator::new(),
            tasks,
            task: None,
            content: None,
            operation_error: None,
            review_error: None,
        }
    }

    /// Builds a generation service over the world's task store and the
    /// provider scripted so far.
    pub fn generation(&self) -> TestGenerationService {
        let gateway = Arc::new(AiGateway::new(
            Arc::new(self.generator.clone()),
            Arc::new(PlaceholderImageGenerator),
            Duration::from_secs(5),
        ));
        let templates = Arc::new(TemplateService::new(
            Arc::new(InMemoryTemplateRepository::new()),
            Arc::new(DefaultClock),
        ));
        ContentGenerationService::new(
            OperationRunner::new(Arc::clone(&self.tasks)),
            gateway,
            templates,
        )
    }

    /// Returns the task the scenario is reviewing.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskReviewWorld {
    TaskReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
