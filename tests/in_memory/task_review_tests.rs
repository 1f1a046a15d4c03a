//! In-memory integration tests for task review and failure recording.

use super::helpers::{Platform, actor};
use scriptorium::error::ErrorKind;
use scriptorium::gateway::{adapters::ScriptedTextGenerator, domain::ProviderError};
use scriptorium::generation::domain::SocialPostBrief;
use scriptorium::language::Language;
use scriptorium::paging::Page;
use scriptorium::task::{
    domain::{NewTask, TaskStatus, TaskType},
    ports::TaskFilter,
};

#[tokio::test(flavor = "multi_thread")]
async fn pending_task_can_be_rejected_with_a_reason() {
    let platform = Platform::new(ScriptedTextGenerator::new());
    let task = platform
        .tasks
        .create(NewTask::new(TaskType::Generation, actor("writer")))
        .await
        .expect("task created");

    let rejected = platform
        .tasks
        .reject(task.id(), &actor("editor"), Some("off brand"))
        .await
        .expect("rejection succeeds");

    assert_eq!(rejected.status(), TaskStatus::Cancelled);
    assert_eq!(rejected.error_message(), Some("Rejected by user: off brand"));
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_task_cannot_be_rejected() {
    let platform = Platform::new(ScriptedTextGenerator::new().with_default_reply("Ready"));
    let completed = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("facebook", "open house"),
            None,
            actor("writer"),
        )
        .await
        .expect("generation succeeds");

    let err = platform
        .tasks
        .reject(completed.task_id(), &actor("editor"), None)
        .await
        .expect_err("terminal task");

    assert_eq!(err.kind(), ErrorKind::Internal);
    let stored = platform
        .tasks
        .get(completed.task_id())
        .await
        .expect("task lookup");
    assert_eq!(stored.status(), TaskStatus::Completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn provider_failure_is_recorded_on_the_task() {
    let platform = Platform::new(ScriptedTextGenerator::new().fail_when(
        "food drive",
        ProviderError::Status {
            status: 503,
            body: "overloaded".to_owned(),
        },
    ));

    let err = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("facebook", "the food drive"),
            None,
            actor("writer"),
        )
        .await
        .expect_err("provider failure");
    assert_eq!(err.kind(), ErrorKind::Provider);

    let failed = platform
        .tasks
        .list(
            &TaskFilter::default().with_status(TaskStatus::Failed),
            Page::default(),
        )
        .await
        .expect("listing succeeds");
    let task = failed.first().expect("one failed task");
    assert_eq!(failed.len(), 1);
    assert!(
        task.error_message()
            .is_some_and(|message| message.contains("overloaded"))
    );
    assert!(task.output_data().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_translation_creates_no_task() {
    let platform = Platform::new(ScriptedTextGenerator::new());

    let err = platform
        .translations
        .translate("   ", Language::En, Language::Es, actor("translator"))
        .await
        .expect_err("blank text");

    assert_eq!(err.kind(), ErrorKind::Validation);
    let stats = platform.tasks.statistics(None).await.expect("statistics");
    assert_eq!(stats.total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_provider_reply_is_a_provider_failure() {
    let platform = Platform::new(ScriptedTextGenerator::new().with_default_reply("   "));

    let err = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("facebook", "the bake sale"),
            None,
            actor("writer"),
        )
        .await
        .expect_err("empty reply");
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.kind().is_retryable());

    let failed = platform
        .tasks
        .list(
            &TaskFilter::default().with_status(TaskStatus::Failed),
            Page::default(),
        )
        .await
        .expect("listing succeeds");
    assert_eq!(failed.len(), 1);
    assert!(
        failed
            .first()
            .and_then(|task| task.error_message())
            .is_some_and(|message| message.starts_with("unusable provider result"))
    );
}
