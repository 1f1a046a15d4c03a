//! Shared fixtures for unit tests that drive whole operations.

use std::sync::Arc;
use std::time::Duration;

use crate::actor::ActorId;
use crate::content::domain::{ContentType, GeneratedContent, NewGeneratedContent};
use crate::gateway::{
    adapters::{PlaceholderImageGenerator, ScriptedTextGenerator},
    services::AiGateway,
};
use crate::language::Language;
use crate::operation::OperationRunner;
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{NewTask, Payload, TaskArtifact, TaskCompletion, TaskType},
    services::TaskLifecycleService,
};
use mockable::DefaultClock;

pub(crate) type Store = InMemoryTaskStore;
pub(crate) type Gateway = AiGateway<ScriptedTextGenerator, PlaceholderImageGenerator>;

/// In-memory task store, lifecycle service, and scripted gateway.
pub(crate) struct Stack {
    pub store: Arc<Store>,
    pub tasks: Arc<TaskLifecycleService<Store, DefaultClock>>,
    pub runner: OperationRunner<Store, DefaultClock>,
    pub generator: ScriptedTextGenerator,
    pub gateway: Arc<Gateway>,
}

impl Stack {
    pub fn new(generator: ScriptedTextGenerator) -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let tasks = Arc::new(TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::new(DefaultClock),
        ));
        let gateway = Arc::new(AiGateway::new(
            Arc::new(generator.clone()),
            Arc::new(PlaceholderImageGenerator),
            Duration::from_secs(5),
        ));
        Self {
            store,
            runner: OperationRunner::new(Arc::clone(&tasks)),
            tasks,
            generator,
            gateway,
        }
    }

    /// Commits a completed generation task owning one content record.
    pub async fn seed_content(&self, body: &str, language: Language) -> GeneratedContent {
        let created = self
            .tasks
            .create(NewTask::new(TaskType::Generation, actor("seeder")))
            .await
            .expect("create task");
        let task = self.tasks.begin_processing(created).await.expect("begin task");
        let content = GeneratedContent::new(
            NewGeneratedContent {
                task_id: task.id(),
                content_type: ContentType::SocialPost,
                title: None,
                body: body.to_owned(),
                language,
                platform: Some("facebook".to_owned()),
                metadata: Payload::new(),
                quality_score: None,
            },
            &DefaultClock,
        )
        .expect("valid content");
        let completion = TaskCompletion {
            output_data: Payload::new(),
            model_used: "seed".to_owned(),
            tokens_used: 1,
            processing_time: Duration::ZERO,
        };
        self.tasks
            .complete_with_artifacts(task, completion, &[TaskArtifact::Content(content.clone())])
            .await
            .expect("commit content");
        content
    }
}

pub(crate) fn actor(name: &str) -> ActorId {
    ActorId::new(name).expect("valid actor")
}
