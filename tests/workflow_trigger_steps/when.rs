//! When steps for workflow trigger BDD scenarios.

use super::world::{WorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use scriptorium::actor::ActorId;
use scriptorium::task::domain::Payload;
use serde_json::json;

fn trigger(world: &mut WorkflowWorld, trigger_data: Payload) -> Result<(), eyre::Report> {
    let id = world.current_workflow()?.id();
    let triggered_by = ActorId::new("scheduler").wrap_err("scenario actor")?;
    match run_async(world.orchestrator.trigger(id, trigger_data, triggered_by)) {
        Ok(execution) => world.execution = Some(execution),
        Err(err) => world.trigger_error = Some(err),
    }
    Ok(())
}

#[when("the workflow is triggered for the generated content")]
fn triggered_for_content(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let content_id = world
        .content
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing generated content in scenario world"))?
        .id();
    let mut trigger_data = Payload::new();
    trigger_data.insert("content_id".to_owned(), json!(content_id));
    trigger(world, trigger_data)
}

#[when("the workflow is triggered without data")]
fn triggered_without_data(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    trigger(world, Payload::new())
}
