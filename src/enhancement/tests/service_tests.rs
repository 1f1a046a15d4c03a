//! Enhancement service tests over the in-memory stack.

use std::sync::Arc;

use crate::enhancement::services::{EnhancementItem, EnhancementService};
use crate::error::ErrorKind;
use crate::gateway::{
    adapters::{PlaceholderImageGenerator, ScriptedTextGenerator},
    domain::{EnhancementKind, ProviderError},
};
use crate::operation::BatchItemResult;
use crate::paging::Page;
use crate::task::{
    domain::{TaskStatus, TaskType},
    ports::TaskFilter,
};
use crate::test_support::{Stack, Store, actor};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Service =
    EnhancementService<Store, DefaultClock, ScriptedTextGenerator, PlaceholderImageGenerator>;

#[fixture]
fn stack() -> Stack {
    Stack::new(
        ScriptedTextGenerator::new()
            .with_default_reply(" Polished text ")
            .fail_when("FAIL", ProviderError::Transport("reset".to_owned())),
    )
}

fn service(stack: &Stack) -> Service {
    EnhancementService::new(stack.runner.clone(), Arc::clone(&stack.gateway))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enhancement_completes_an_unapproved_task(stack: Stack) {
    let completed = service(&stack)
        .enhance("rough text", EnhancementKind::Improve, None, actor("editor"))
        .await
        .expect("enhancement succeeds");

    assert_eq!(completed.value.enhanced_text, "Polished text");
    assert_eq!(completed.task.task_type(), TaskType::Enhancement);
    assert_eq!(completed.task.status(), TaskStatus::Completed);
    assert!(!completed.task.requires_approval());
    let output = completed.task.output_data().expect("output recorded");
    assert_eq!(
        output.get("enhanced_text").and_then(|value| value.as_str()),
        Some("Polished text")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarize_passes_the_word_limit(stack: Stack) {
    service(&stack)
        .summarize("long text", Some(50), actor("editor"))
        .await
        .expect("summary succeeds");

    let requests = stack.generator.requests();
    assert!(
        requests
            .iter()
            .any(|request| request.prompt.contains("(Maximum 50 words):"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seo_keywords_are_joined(stack: Stack) {
    let keywords = vec!["charity".to_owned(), "giving".to_owned()];
    service(&stack)
        .optimize_seo("text", &keywords, actor("editor"))
        .await
        .expect("seo succeeds");

    assert!(
        stack
            .generator
            .requests()
            .iter()
            .any(|request| request.prompt.contains("keywords: charity, giving."))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adjust_tone_and_fix_grammar_use_their_kinds(stack: Stack) {
    let enhancements = service(&stack);
    enhancements
        .adjust_tone("text", "urgent", actor("editor"))
        .await
        .expect("tone succeeds");
    enhancements
        .fix_grammar("text", actor("editor"))
        .await
        .expect("grammar succeeds");

    let prompts: Vec<String> = stack
        .generator
        .requests()
        .into_iter()
        .map(|request| request.prompt)
        .collect();
    assert!(prompts.iter().any(|prompt| prompt.contains("to be urgent:")));
    assert!(prompts.iter().any(|prompt| prompt.starts_with("Fix all grammar")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_text_is_rejected_before_a_task_exists(stack: Stack) {
    let error = service(&stack)
        .fix_grammar("  ", actor("editor"))
        .await
        .expect_err("blank text rejected");

    assert_eq!(error.kind(), ErrorKind::Validation);
    let tasks = stack
        .tasks
        .list(&TaskFilter::default(), Page::default())
        .await
        .expect("list tasks");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_reports_unsupported_kinds_and_provider_failures(stack: Stack) {
    let items = vec![
        EnhancementItem::new("first", "grammar"),
        EnhancementItem::new("second", "rewrite"),
        EnhancementItem::new("FAIL third", "tone").with_context("calm"),
        EnhancementItem::new("fourth", "summarize"),
    ];

    let results = service(&stack).batch_enhance(&items, &actor("editor")).await;

    let successes: Vec<bool> = results.iter().map(BatchItemResult::is_success).collect();
    assert_eq!(successes, vec![true, false, false, true]);
    let kinds: Vec<Option<ErrorKind>> = results
        .iter()
        .map(|result| match result {
            BatchItemResult::Failure { kind, .. } => Some(*kind),
            BatchItemResult::Success(_) => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![None, Some(ErrorKind::Validation), Some(ErrorKind::Provider), None]
    );
    let statuses: Vec<TaskStatus> = stack
        .tasks
        .list(&TaskFilter::default(), Page::default())
        .await
        .expect("list tasks")
        .iter()
        .map(|task| task.status())
        .collect();
    assert_eq!(statuses.len(), 3);
    assert_eq!(
        statuses.iter().filter(|status| **status == TaskStatus::Failed).count(),
        1
    );
}
