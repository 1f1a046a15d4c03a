//! When steps for task review BDD scenarios.

use super::world::{TaskReviewWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use scriptorium::actor::ActorId;
use scriptorium::generation::domain::SocialPostBrief;
use scriptorium::paging::Page;
use scriptorium::task::ports::TaskFilter;

#[when(r#""{writer}" generates a "{platform}" post about "{topic}""#)]
fn generate_post(
    world: &mut TaskReviewWorld,
    writer: String,
    platform: String,
    topic: String,
) -> Result<(), eyre::Report> {
    let created_by = ActorId::new(writer).wrap_err("scenario actor")?;
    let generation = world.generation();
    let result = run_async(generation.generate_social_post(
        SocialPostBrief::new(platform, topic),
        None,
        created_by,
    ));
    match result {
        Ok(completed) => {
            world.task = Some(completed.task);
            world.content = Some(completed.value);
        }
        Err(err) => {
            let tasks = run_async(world.tasks.list(&TaskFilter::default(), Page::default()))
                .wrap_err("list tasks after failed generation")?;
            world.task = tasks.into_iter().next();
            world.operation_error = Some(err);
        }
    }
    Ok(())
}

#[when(r#""{reviewer}" approves the task"#)]
fn approve_task(world: &mut TaskReviewWorld, reviewer: String) -> Result<(), eyre::Report> {
    let approved_by = ActorId::new(reviewer).wrap_err("scenario actor")?;
    let task_id = world.current_task()?.id();
    let approved =
        run_async(world.tasks.approve(task_id, approved_by)).wrap_err("approve task")?;
    world.task = Some(approved);
    Ok(())
}

#[when(r#""{reviewer}" rejects the task because "{reason}""#)]
fn reject_task(
    world: &mut TaskReviewWorld,
    reviewer: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let rejected_by = ActorId::new(reviewer).wrap_err("scenario actor")?;
    let task_id = world.current_task()?.id();
    match run_async(world.tasks.reject(task_id, &rejected_by, Some(&reason))) {
        Ok(rejected) => world.task = Some(rejected),
        Err(err) => world.review_error = Some(err),
    }
    Ok(())
}
