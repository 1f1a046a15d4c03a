//! Then steps for task review BDD scenarios.

use super::world::{TaskReviewWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use scriptorium::error::ErrorKind;
use scriptorium::task::domain::{TaskDomainError, TaskStatus};
use scriptorium::task::services::TaskLifecycleError;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskReviewWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.current_task()?.id();
    let stored = run_async(world.tasks.get(task_id)).wrap_err("reload task")?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"the task is approved by "{reviewer}""#)]
fn task_is_approved(world: &TaskReviewWorld, reviewer: String) -> Result<(), eyre::Report> {
    let approval = world
        .current_task()?
        .approval()
        .ok_or_else(|| eyre::eyre!("task carries no approval"))?;
    if approval.approved_by.as_str() != reviewer {
        return Err(eyre::eyre!(
            "expected approval by {reviewer}, found {}",
            approval.approved_by
        ));
    }
    Ok(())
}

#[then(r#"the generated content body is "{body}""#)]
fn content_body_is(world: &TaskReviewWorld, body: String) -> Result<(), eyre::Report> {
    let content = world
        .content
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing generated content"))?;
    if content.body() != body {
        return Err(eyre::eyre!(
            "expected body {body:?}, found {:?}",
            content.body()
        ));
    }
    Ok(())
}

#[then(r#"the task error message is "{message}""#)]
fn task_error_message_is(world: &TaskReviewWorld, message: String) -> Result<(), eyre::Report> {
    let actual = world.current_task()?.error_message();
    if actual != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "expected error message {message:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("the review is refused")]
fn review_is_refused(world: &TaskReviewWorld) -> Result<(), eyre::Report> {
    let err = world
        .review_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the review to fail"))?;
    if !matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::InvalidStateTransition { .. })
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStateTransition error, got {err:?}"
        ));
    }
    Ok(())
}

#[then("the operation fails with a provider error")]
fn operation_fails_with_provider_error(world: &TaskReviewWorld) -> Result<(), eyre::Report> {
    let err = world
        .operation_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    if err.kind() != ErrorKind::Provider {
        return Err(eyre::eyre!("expected a provider error, got {err:?}"));
    }
    Ok(())
}
