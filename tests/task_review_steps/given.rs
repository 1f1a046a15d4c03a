//! Given steps for task review BDD scenarios.

use super::world::{TaskReviewWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use scriptorium::actor::ActorId;
use scriptorium::gateway::domain::ProviderError;
use scriptorium::task::domain::{NewTask, TaskType};

#[given(r#"the provider replies with "{reply}""#)]
fn provider_replies(world: &mut TaskReviewWorld, reply: String) {
    world.generator = world.generator.clone().with_default_reply(reply);
}

#[given(r#"the provider fails on "{needle}""#)]
fn provider_fails(world: &mut TaskReviewWorld, needle: String) {
    world.generator = world.generator.clone().fail_when(
        needle,
        ProviderError::Status {
            status: 503,
            body: "provider overloaded".to_owned(),
        },
    );
}

#[given(r#"a pending generation task created by "{creator}""#)]
fn pending_task(world: &mut TaskReviewWorld, creator: String) -> Result<(), eyre::Report> {
    let created_by = ActorId::new(creator).wrap_err("scenario actor")?;
    let task = run_async(
        world
            .tasks
            .create(NewTask::new(TaskType::Generation, created_by)),
    )
    .wrap_err("create pending task")?;
    world.task = Some(task);
    Ok(())
}
