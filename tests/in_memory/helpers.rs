//! Shared wiring for in-memory integration tests.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use scriptorium::actor::ActorId;
use scriptorium::content::services::ContentService;
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
    domain::WorkflowType,
    services::{
        AutoTranslateHandler, ScheduledPostHandler, WorkflowHandlerRegistry, WorkflowOrchestrator,
    },
};

/// Task store shared by every service.
pub type Store = InMemoryTaskStore;
/// Generation service over the scripted provider.
pub type Generation = ContentGenerationService<
    Store,
    DefaultClock,
    ScriptedTextGenerator,
    PlaceholderImageGenerator,
    InMemoryTemplateRepository,
>;
/// Translation service over the scripted provider.
pub type Translations =
    TranslationService<Store, DefaultClock, ScriptedTextGenerator, PlaceholderImageGenerator>;
/// Publishing service over the recording publisher.
pub type Publishing = PublishingService<Store, DefaultClock, RecordingPublisher>;
/// Workflow orchestrator over in-memory stores.
pub type Orchestrator =
    WorkflowOrchestrator<InMemoryWorkflowRepository, InMemoryExecutionHistory, DefaultClock>;

/// Every service wired over one in-memory store.
pub struct Platform {
    pub tasks: Arc<TaskLifecycleService<Store, DefaultClock>>,
    pub content: Arc<ContentService<Store, DefaultClock>>,
    pub templates: Arc<TemplateService<InMemoryTemplateRepository, DefaultClock>>,
    pub generation: Arc<Generation>,
    pub translations: Arc<Translations>,
    pub publishing: Arc<Publishing>,
    pub orchestrator: Orchestrator,
    pub generator: ScriptedTextGenerator,
    pub publisher: RecordingPublisher,
}

impl Platform {
    /// Wires the platform around a scripted provider.
    pub fn new(generator: ScriptedTextGenerator) -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let clock = Arc::new(DefaultClock);
        let tasks = Arc::new(TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
        ));
        let runner = OperationRunner::new(Arc::clone(&tasks));
        let gateway = Arc::new(AiGateway::new(
            Arc::new(generator.clone()),
            Arc::new(PlaceholderImageGenerator),
            Duration::from_secs(5),
        ));
        let content = Arc::new(ContentService::new(Arc::clone(&store), Arc::clone(&clock)));
        let templates = Arc::new(TemplateService::new(
            Arc::new(InMemoryTemplateRepository::new()),
            Arc::clone(&clock),
        ));
        let generation = Arc::new(ContentGenerationService::new(
            runner.clone(),
            Arc::clone(&gateway),
            Arc::clone(&templates),
        ));
        let translations = Arc::new(TranslationService::new(
            runner,
            Arc::clone(&store),
            gateway,
        ));
        let publisher = RecordingPublisher::new();
        let publishing = Arc::new(PublishingService::new(
            Arc::clone(&content),
            Arc::new(publisher.clone()),
        ));
        let registry = WorkflowHandlerRegistry::new()
            .with_handler(
                WorkflowType::auto_translate(),
                Arc::new(AutoTranslateHandler::new(Arc::clone(&translations))),
            )
            .with_handler(
                WorkflowType::scheduled_post(),
                Arc::new(ScheduledPostHandler::new(
                    Arc::clone(&generation),
                    Arc::clone(&publishing),
                )),
            );
        let orchestrator = WorkflowOrchestrator::new(
            Arc::new(InMemoryWorkflowRepository::new()),
            Arc::new(InMemoryExecutionHistory::new()),
            registry,
            clock,
        );
        Self {
            tasks,
            content,
            templates,
            generation,
            translations,
            publishing,
            orchestrator,
            generator,
            publisher,
        }
    }
}

/// Provider that answers translation prompts by target language.
pub fn multilingual_provider() -> ScriptedTextGenerator {
    ScriptedTextGenerator::new()
        .with_default_reply("Join our food drive this Saturday!")
        .reply_when("to Spanish", "¡Únete a nuestra colecta este sábado!")
        .reply_when("to French", "Rejoignez notre collecte ce samedi !")
        .reply_when("to Portuguese", "Participe da nossa campanha neste sábado!")
        .with_tokens_used(30)
}

/// Builds a valid actor identifier.
pub fn actor(name: &str) -> ActorId {
    ActorId::new(name).expect("valid actor")
}
