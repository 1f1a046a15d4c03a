//! In-memory integration tests for workflow triggers and history.

use super::helpers::{Platform, actor, multilingual_provider};
use scriptorium::error::ErrorKind;
use scriptorium::generation::domain::SocialPostBrief;
use scriptorium::task::domain::Payload;
use scriptorium::workflow::{
    domain::{ExecutionOutcome, NewWorkflow, WorkflowId, WorkflowPatch, WorkflowType},
    services::WorkflowServiceError,
};
use serde_json::{Value, json};

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn auto_translate_workflow_translates_generated_content() {
    let platform = Platform::new(multilingual_provider());
    let completed = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("facebook", "the reading club"),
            None,
            actor("writer"),
        )
        .await
        .expect("generation succeeds");
    let workflow = platform
        .orchestrator
        .create(
            NewWorkflow::new("Translate posts", WorkflowType::auto_translate(), actor("ops"))
                .with_config(object(json!({"target_languages": ["es", "pt"]}))),
        )
        .await
        .expect("workflow created");

    let execution = platform
        .orchestrator
        .trigger(
            workflow.id(),
            object(json!({"content_id": completed.value.id()})),
            actor("scheduler"),
        )
        .await
        .expect("trigger succeeds");

    assert!(matches!(execution.outcome(), ExecutionOutcome::Completed { .. }));
    let translations = execution
        .result()
        .and_then(|result| result.get("translations"))
        .and_then(Value::as_object)
        .expect("translations in result");
    assert_eq!(translations.len(), 2);
    assert!(translations.contains_key("es"));
    assert!(translations.contains_key("pt"));
}

#[tokio::test(flavor = "multi_thread")]
async fn scheduled_post_workflow_generates_and_publishes() {
    let platform = Platform::new(multilingual_provider());
    let workflow = platform
        .orchestrator
        .create(
            NewWorkflow::new("Weekly post", WorkflowType::scheduled_post(), actor("ops"))
                .with_config(object(json!({
                    "platform": "twitter",
                    "topic": "weekend volunteering",
                    "publish": true
                }))),
        )
        .await
        .expect("workflow created");

    let execution = platform
        .orchestrator
        .trigger(workflow.id(), Payload::new(), actor("scheduler"))
        .await
        .expect("trigger succeeds");

    let result = execution.result().expect("completed execution");
    assert_eq!(result.get("published"), Some(&json!(true)));
    assert_eq!(result.get("external_id"), Some(&json!("recorded-1")));
    let published = platform.publisher.published();
    assert_eq!(
        published.first().map(|request| request.content.as_str()),
        Some("Join our food drive this Saturday!")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_and_successful_runs_share_one_history() {
    let platform = Platform::new(multilingual_provider());
    let workflow = platform
        .orchestrator
        .create(NewWorkflow::new(
            "Translate posts",
            WorkflowType::auto_translate(),
            actor("ops"),
        ))
        .await
        .expect("workflow created");

    let err = platform
        .orchestrator
        .trigger(workflow.id(), Payload::new(), actor("scheduler"))
        .await
        .expect_err("missing content id");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let history = platform
        .orchestrator
        .history(workflow.id(), 10)
        .await
        .expect("history");
    assert_eq!(history.len(), 1);
    assert!(
        history
            .first()
            .and_then(|execution| execution.error())
            .is_some_and(|error| error.contains("content_id"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivated_workflow_refuses_triggers() {
    let platform = Platform::new(multilingual_provider());
    let workflow = platform
        .orchestrator
        .create(NewWorkflow::new(
            "Weekly post",
            WorkflowType::scheduled_post(),
            actor("ops"),
        ))
        .await
        .expect("workflow created");
    platform
        .orchestrator
        .update(workflow.id(), WorkflowPatch::default().with_active(false))
        .await
        .expect("deactivation succeeds");

    let err = platform
        .orchestrator
        .trigger(workflow.id(), Payload::new(), actor("scheduler"))
        .await
        .expect_err("inactive workflow");

    assert!(matches!(err, WorkflowServiceError::Inactive(id) if id == workflow.id()));
    let history = platform
        .orchestrator
        .history(workflow.id(), 10)
        .await
        .expect("history");
    assert!(history.is_empty());
    assert!(platform.generator.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn workflow_created_inactive_never_runs() {
    let platform = Platform::new(multilingual_provider());
    let workflow = platform
        .orchestrator
        .create(
            NewWorkflow::new("Paused", WorkflowType::auto_translate(), actor("ops"))
                .with_active(false),
        )
        .await
        .expect("workflow created");
    assert!(!workflow.is_active());

    let err = platform
        .orchestrator
        .trigger(workflow.id(), Payload::new(), actor("scheduler"))
        .await
        .expect_err("inactive workflow");

    assert!(matches!(err, WorkflowServiceError::Inactive(_)));
    assert!(
        platform
            .orchestrator
            .history(workflow.id(), 10)
            .await
            .expect("history")
            .is_empty()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_workflow_leaves_no_history() {
    let platform = Platform::new(multilingual_provider());
    let unknown = WorkflowId::new();

    let err = platform
        .orchestrator
        .trigger(unknown, Payload::new(), actor("scheduler"))
        .await
        .expect_err("unknown workflow");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    let history = platform
        .orchestrator
        .history(unknown, 10)
        .await
        .expect("history");
    assert!(history.is_empty());
}
