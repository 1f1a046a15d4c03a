//! Operation runner tests over the in-memory task store.

use std::sync::Arc;
use std::time::Duration;

use crate::actor::ActorId;
use crate::content::{
    domain::{ContentType, GeneratedContent, NewGeneratedContent},
    ports::{ContentFilter, ContentRepository},
};
use crate::error::ErrorKind;
use crate::gateway::{
    adapters::{PlaceholderImageGenerator, ScriptedTextGenerator},
    domain::{ProviderError, TextRequest, TextResponse},
    services::AiGateway,
};
use crate::language::Language;
use crate::operation::{
    OperationError, OperationOutcome, OperationResult, OperationRunner, payload,
};
use crate::paging::Page;
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{NewTask, Payload, Task, TaskArtifact, TaskId, TaskStatus, TaskType},
    ports::{TaskFilter, TaskRepository, TaskRepositoryResult, TaskStatistics},
    services::TaskLifecycleService,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

type Gateway = AiGateway<ScriptedTextGenerator, PlaceholderImageGenerator>;

struct Harness {
    store: Arc<InMemoryTaskStore>,
    tasks: Arc<TaskLifecycleService<InMemoryTaskStore, DefaultClock>>,
    runner: OperationRunner<InMemoryTaskStore, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryTaskStore::new());
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
    ));
    Harness {
        store,
        runner: OperationRunner::new(Arc::clone(&tasks)),
        tasks,
    }
}

fn gateway(generator: ScriptedTextGenerator) -> Arc<Gateway> {
    Arc::new(AiGateway::new(
        Arc::new(generator),
        Arc::new(PlaceholderImageGenerator),
        Duration::from_secs(5),
    ))
}

fn request() -> NewTask {
    NewTask::new(
        TaskType::Generation,
        ActorId::new("writer").expect("valid actor"),
    )
    .with_prompt("Write a post")
}

fn settle_as_content(
    task: &Task,
    response: TextResponse,
) -> OperationResult<OperationOutcome<GeneratedContent>> {
    let content = GeneratedContent::new(
        NewGeneratedContent {
            task_id: task.id(),
            content_type: ContentType::SocialPost,
            title: None,
            body: response.text.clone(),
            language: Language::En,
            platform: None,
            metadata: Payload::new(),
            quality_score: None,
        },
        &DefaultClock,
    )
    .map_err(OperationError::unusable_result)?;
    Ok(OperationOutcome {
        output_data: payload([("text", json!(response.text))]),
        model_used: response.model_used,
        tokens_used: response.tokens_used,
        artifacts: vec![TaskArtifact::Content(content.clone())],
        value: content,
    })
}

async fn contents(store: &InMemoryTaskStore) -> Vec<GeneratedContent> {
    ContentRepository::list(store, &ContentFilter::default(), Page::default())
        .await
        .expect("list content")
}

/// Waits until the only task has a provider call in flight.
async fn running_call(harness: &Harness) -> TaskId {
    let mut found = None;
    for _ in 0..200 {
        let tasks = harness
            .tasks
            .list(&TaskFilter::default(), Page::default())
            .await
            .expect("list tasks");
        found = tasks
            .first()
            .map(Task::id)
            .filter(|id| harness.tasks.in_flight().is_running(*id));
        if found.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    found.expect("provider call started")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_calls_commit_the_task_with_its_artifacts(harness: Harness) {
    let gateway = gateway(ScriptedTextGenerator::new().with_default_reply("Hello world"));
    let text_request = TextRequest::new("Write a post");

    let completed = harness
        .runner
        .run(request(), gateway.generate_text(&text_request), settle_as_content)
        .await
        .expect("operation succeeds");

    assert_eq!(completed.task.status(), TaskStatus::Completed);
    assert_eq!(completed.task.model_used(), Some("scripted"));
    assert_eq!(completed.task.tokens_used(), 10);
    assert!(completed.task.processing_time() >= 0.0);
    let stored = harness.tasks.get(completed.task_id()).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(contents(&harness.store).await, vec![completed.value]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_failures_fail_the_task(harness: Harness) {
    let gateway = gateway(
        ScriptedTextGenerator::new()
            .fail_when("post", ProviderError::Transport("reset".to_owned())),
    );
    let text_request = TextRequest::new("Write a post");

    let error = harness
        .runner
        .run(request(), gateway.generate_text(&text_request), settle_as_content)
        .await
        .expect_err("provider fails");

    assert!(matches!(error, OperationError::Gateway(_)));
    let tasks = harness
        .tasks
        .list(&TaskFilter::default(), Page::default())
        .await
        .expect("list tasks");
    let [task] = tasks.as_slice() else {
        panic!("expected one task, found {}", tasks.len());
    };
    assert_eq!(task.status(), TaskStatus::Failed);
    assert_eq!(task.error_message(), Some("provider transport error: reset"));
    assert!(contents(&harness.store).await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_failures_leave_a_failed_task_and_no_artifact(harness: Harness) {
    harness
        .store
        .fail_next_commit("disk full")
        .expect("store lock");
    let gateway = gateway(ScriptedTextGenerator::new());
    let text_request = TextRequest::new("Write a post");

    let error = harness
        .runner
        .run(request(), gateway.generate_text(&text_request), settle_as_content)
        .await
        .expect_err("commit fails");

    assert!(matches!(error, OperationError::Task(_)));
    let tasks = harness
        .tasks
        .list(&TaskFilter::default(), Page::default())
        .await
        .expect("list tasks");
    assert!(tasks.iter().all(|task| task.status() == TaskStatus::Failed));
    assert!(tasks.iter().all(|task| task.output_data().is_none()));
    assert!(contents(&harness.store).await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_results_fail_the_task(harness: Harness) {
    let gateway = gateway(ScriptedTextGenerator::new().with_default_reply("   "));
    let text_request = TextRequest::new("Write a post");

    let error = harness
        .runner
        .run(request(), gateway.generate_text(&text_request), settle_as_content)
        .await
        .expect_err("blank body rejected");

    assert!(matches!(error, OperationError::UnusableResult(_)));
    assert_eq!(error.kind(), ErrorKind::Provider);
    let tasks = harness
        .tasks
        .list(&TaskFilter::default(), Page::default())
        .await
        .expect("list tasks");
    assert!(tasks.iter().all(|task| task.status() == TaskStatus::Failed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejecting_a_running_task_cancels_its_provider_call(harness: Harness) {
    let gateway = gateway(ScriptedTextGenerator::new().with_delay(Duration::from_secs(30)));
    let runner = harness.runner.clone();
    let running = tokio::spawn(async move {
        let text_request = TextRequest::new("Write a post");
        runner
            .run(request(), gateway.generate_text(&text_request), settle_as_content)
            .await
    });

    let task_id = running_call(&harness).await;

    let reviewer = ActorId::new("reviewer").expect("valid actor");
    harness
        .tasks
        .reject(task_id, &reviewer, Some("off-brand"))
        .await
        .expect("reject succeeds");

    let outcome = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("operation finishes promptly")
        .expect("join");
    assert!(matches!(outcome, Err(OperationError::Cancelled(id)) if id == task_id));
    let stored = harness.tasks.get(task_id).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Cancelled);
    assert_eq!(
        stored.error_message(),
        Some("Rejected by user: off-brand")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_during_the_call_survives_the_commit(harness: Harness) {
    let gateway = gateway(ScriptedTextGenerator::new().with_delay(Duration::from_millis(500)));
    let runner = harness.runner.clone();
    let running = tokio::spawn(async move {
        let text_request = TextRequest::new("Write a post");
        runner
            .run(request(), gateway.generate_text(&text_request), settle_as_content)
            .await
    });
    let task_id = running_call(&harness).await;

    let reviewer = ActorId::new("reviewer").expect("valid actor");
    let approved = harness
        .tasks
        .approve(task_id, reviewer.clone())
        .await
        .expect("approve succeeds");
    assert_eq!(approved.status(), TaskStatus::Processing);

    let completed = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("operation finishes promptly")
        .expect("join")
        .expect("operation succeeds");
    assert_eq!(completed.task_id(), task_id);
    let stored = harness.tasks.get(task_id).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(
        stored.approval().map(|approval| &approval.approved_by),
        Some(&reviewer)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_during_a_failing_call_survives_the_failure(harness: Harness) {
    let gateway = gateway(
        ScriptedTextGenerator::new()
            .with_delay(Duration::from_millis(500))
            .fail_when("post", ProviderError::Transport("reset".to_owned())),
    );
    let runner = harness.runner.clone();
    let running = tokio::spawn(async move {
        let text_request = TextRequest::new("Write a post");
        runner
            .run(request(), gateway.generate_text(&text_request), settle_as_content)
            .await
    });
    let task_id = running_call(&harness).await;

    let reviewer = ActorId::new("reviewer").expect("valid actor");
    harness
        .tasks
        .approve(task_id, reviewer)
        .await
        .expect("approve succeeds");

    let outcome = tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("operation finishes promptly")
        .expect("join");
    assert!(matches!(outcome, Err(OperationError::Gateway(_))));
    let stored = harness.tasks.get(task_id).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Failed);
    assert!(stored.is_approved());
}

/// Task store on which a reviewer rejects every task just before it starts.
#[derive(Default)]
struct RejectedOnStart {
    inner: InMemoryTaskStore,
}

#[async_trait]
impl TaskRepository for RejectedOnStart {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        TaskRepository::store(&self.inner, task).await
    }

    async fn update(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        if expected == TaskStatus::Pending {
            let mut stored = TaskRepository::find_by_id(&self.inner, task.id())
                .await?
                .expect("task stored");
            stored
                .reject(Some("changed plans"), &DefaultClock)
                .expect("pending task rejects");
            TaskRepository::update(&self.inner, &stored, TaskStatus::Pending).await?;
        }
        TaskRepository::update(&self.inner, task, expected).await
    }

    async fn commit_completion(
        &self,
        task: &Task,
        artifacts: &[TaskArtifact],
    ) -> TaskRepositoryResult<()> {
        self.inner.commit_completion(task, artifacts).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        TaskRepository::find_by_id(&self.inner, id).await
    }

    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        TaskRepository::list(&self.inner, filter, page).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        TaskRepository::delete(&self.inner, id).await
    }

    async fn statistics(
        &self,
        created_by: Option<&ActorId>,
    ) -> TaskRepositoryResult<TaskStatistics> {
        TaskRepository::statistics(&self.inner, created_by).await
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn rejection_before_the_call_starts_reports_cancellation() {
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::new(RejectedOnStart::default()),
        Arc::new(DefaultClock),
    ));
    let runner = OperationRunner::new(Arc::clone(&tasks));
    let generator = ScriptedTextGenerator::new();
    let gateway = gateway(generator.clone());
    let text_request = TextRequest::new("Write a post");

    let error = runner
        .run(request(), gateway.generate_text(&text_request), settle_as_content)
        .await
        .expect_err("rejected before the call");

    let OperationError::Cancelled(task_id) = error else {
        panic!("expected cancellation, got {error}");
    };
    assert_eq!(error.kind(), ErrorKind::Validation);
    let stored = tasks.get(task_id).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::Cancelled);
    assert_eq!(stored.error_message(), Some("Rejected by user: changed plans"));
    assert!(generator.requests().is_empty());
}
