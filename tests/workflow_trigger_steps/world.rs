//! Shared world state for workflow trigger BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::fixture;
use scriptorium::content::{domain::GeneratedContent, services::ContentService};
use scriptorium::gateway::{
    adapters::{PlaceholderImageGenerator, ScriptedTextGenerator},
    services::AiGateway,
};
use scriptorium::generation::services::ContentGenerationService;
use scriptorium::operation::OperationRunner;
use scriptorium::publishing::{adapters::RecordingPublisher, services::PublishingService};
use scriptorium::task::{adapters::memory::InMemoryTaskStore, services::TaskLifecycleService};
use scriptorium::template::{
    adapters::memory::InMemoryTemplateRepository, services::TemplateService,
};
use scriptorium::translation::services::TranslationService;
use scriptorium::workflow::{
    adapters::memory::{InMemoryExecutionHistory, InMemoryWorkflowRepository},
    domain::{Workflow, WorkflowExecution, WorkflowType},
    services::{
        AutoTranslateHandler, ScheduledPostHandler, WorkflowHandlerRegistry, WorkflowOrchestrator,
        WorkflowServiceError,
    },
};

/// Generation service type used by the BDD world.
pub type TestGenerationService = ContentGenerationService<
    InMemoryTaskStore,
    DefaultClock,
    ScriptedTextGenerator,
    PlaceholderImageGenerator,
    InMemoryTemplateRepository,
>;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator =
    WorkflowOrchestrator<InMemoryWorkflowRepository, InMemoryExecutionHistory, DefaultClock>;

/// Scenario world for workflow trigger behaviour tests.
pub struct WorkflowWorld {
    pub generation: Arc<TestGenerationService>,
    pub orchestrator: TestOrchestrator,
    pub publisher: RecordingPublisher,
    pub content: Option<GeneratedContent>,
    pub workflow: Option<Workflow>,
    pub execution: Option<WorkflowExecution>,
    pub trigger_error: Option<WorkflowServiceError>,
}

impl WorkflowWorld {
    /// Creates a world with both built-in handlers over in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let generator = ScriptedTextGenerator::new()
            .with_default_reply("Volunteers make our week.")
            .reply_when("to Spanish", "Los voluntarios hacen nuestra semana.")
            .reply_when("to French", "Les bénévoles font notre semaine.")
            .reply_when("to Portuguese", "Os voluntários fazem a nossa semana.");
        let store = Arc::new(InMemoryTaskStore::new());
        let clock = Arc::new(DefaultClock);
        let runner = OperationRunner::new(Arc::new(TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
        )));
        let gateway = Arc::new(AiGateway::new(
            Arc::new(generator),
            Arc::new(PlaceholderImageGenerator),
            Duration::from_secs(5),
        ));
        let generation = Arc::new(ContentGenerationService::new(
            runner.clone(),
            Arc::clone(&gateway),
            Arc::new(TemplateService::new(
                Arc::new(InMemoryTemplateRepository::new()),
                Arc::clone(&clock),
            )),
        ));
        let translations = Arc::new(TranslationService::new(
            runner,
            Arc::clone(&store),
            gateway,
        ));
        let publisher = RecordingPublisher::new();
        let publishing = Arc::new(PublishingService::new(
            Arc::new(ContentService::new(store, Arc::clone(&clock))),
            Arc::new(publisher.clone()),
        ));
        let registry = WorkflowHandlerRegistry::new()
            .with_handler(
                WorkflowType::auto_translate(),
                Arc::new(AutoTranslateHandler::new(translations)),
            )
            .with_handler(
                WorkflowType::scheduled_post(),
                Arc::new(ScheduledPostHandler::new(
                    Arc::clone(&generation),
                    publishing,
                )),
            );
        let orchestrator = WorkflowOrchestrator::new(
            Arc::new(InMemoryWorkflowRepository::new()),
            Arc::new(InMemoryExecutionHistory::new()),
            registry,
            clock,
        );
        Self {
            generation,
            orchestrator,
            publisher,
            content: None,
            workflow: None,
            execution: None,
            trigger_error: None,
        }
    }

    /// Returns the workflow under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no workflow has been created yet.
    pub fn current_workflow(&self) -> Result<&Workflow, eyre::Report> {
        self.workflow
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing workflow in scenario world"))
    }
}

impl Default for WorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkflowWorld {
    WorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
