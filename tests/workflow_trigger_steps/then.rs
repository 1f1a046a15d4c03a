//! Then steps for workflow trigger BDD scenarios.

use super::world::{WorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use scriptorium::error::ErrorKind;
use scriptorium::workflow::{domain::ExecutionOutcome, services::WorkflowServiceError};
use serde_json::Value;

#[then("the execution completed")]
fn execution_completed(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let execution = world
        .execution
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected an execution, got {:?}", world.trigger_error))?;
    if !matches!(execution.outcome(), ExecutionOutcome::Completed { .. }) {
        return Err(eyre::eyre!(
            "expected a completed execution, got {:?}",
            execution.outcome()
        ));
    }
    Ok(())
}

#[then(r#"the execution translated into "{languages}""#)]
fn execution_translated_into(world: &WorkflowWorld, languages: String) -> Result<(), eyre::Report> {
    let translations = world
        .execution
        .as_ref()
        .and_then(|execution| execution.result())
        .and_then(|result| result.get("translations"))
        .and_then(Value::as_object)
        .ok_or_else(|| eyre::eyre!("execution result carries no translations"))?;
    let actual: Vec<&str> = translations.keys().map(String::as_str).collect();
    let expected: Vec<&str> = languages.split(',').map(str::trim).collect();
    if actual != expected {
        return Err(eyre::eyre!(
            "expected translations {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("the workflow history length is {count:usize}")]
fn history_length(world: &WorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.current_workflow()?.id();
    let history = run_async(world.orchestrator.history(id, 50)).wrap_err("load history")?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} executions, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then("the trigger fails with a validation error")]
fn trigger_fails_validation(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let err = world
        .trigger_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the trigger to fail"))?;
    if err.kind() != ErrorKind::Validation {
        return Err(eyre::eyre!("expected a validation error, got {err:?}"));
    }
    Ok(())
}

#[then("the trigger fails because the workflow is inactive")]
fn trigger_fails_inactive(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let err = world
        .trigger_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the trigger to fail"))?;
    if !matches!(err, WorkflowServiceError::Inactive(_)) {
        return Err(eyre::eyre!("expected an inactive workflow error, got {err:?}"));
    }
    Ok(())
}

#[then("{count:usize} post was handed to the publisher")]
fn posts_handed_to_publisher(world: &WorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let published = world.publisher.published().len();
    if published != count {
        return Err(eyre::eyre!("expected {count} published posts, found {published}"));
    }
    Ok(())
}
