//! Given steps for workflow trigger BDD scenarios.

use super::world::{WorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use scriptorium::actor::ActorId;
use scriptorium::generation::domain::{ContentBrief, GenerationRequest, SocialPostBrief};
use scriptorium::language::Language;
use scriptorium::task::domain::Payload;
use scriptorium::workflow::domain::{NewWorkflow, WorkflowPatch, WorkflowType};
use serde_json::{Value, json};

fn workflow_type(raw: String) -> Result<WorkflowType, eyre::Report> {
    WorkflowType::new(raw).map_err(|err| eyre::eyre!("invalid workflow type in scenario: {err}"))
}

fn create_workflow(
    world: &mut WorkflowWorld,
    workflow_type: WorkflowType,
    config: Payload,
) -> Result<(), eyre::Report> {
    let created_by = ActorId::new("ops").wrap_err("scenario actor")?;
    let request =
        NewWorkflow::new("Scenario workflow", workflow_type, created_by).with_config(config);
    let workflow = run_async(world.orchestrator.create(request)).wrap_err("create workflow")?;
    world.workflow = Some(workflow);
    Ok(())
}

#[given(r#"generated content in "{code}""#)]
fn generated_content(world: &mut WorkflowWorld, code: String) -> Result<(), eyre::Report> {
    let language = Language::try_from(code.as_str())
        .map_err(|err| eyre::eyre!("invalid language in scenario: {err}"))?;
    let created_by = ActorId::new("writer").wrap_err("scenario actor")?;
    let request = GenerationRequest::new(ContentBrief::SocialPost(SocialPostBrief::new(
        "facebook",
        "volunteer week",
    )))
    .with_language(language);
    let completed = run_async(world.generation.generate(request, created_by))
        .wrap_err("generate content")?;
    world.content = Some(completed.value);
    Ok(())
}

#[given(r#"an "{kind}" workflow targeting "{languages}""#)]
fn translate_workflow(
    world: &mut WorkflowWorld,
    kind: String,
    languages: String,
) -> Result<(), eyre::Report> {
    let targets: Vec<Value> = languages.split(',').map(|code| json!(code.trim())).collect();
    let mut config = Payload::new();
    config.insert("target_languages".to_owned(), Value::Array(targets));
    create_workflow(world, workflow_type(kind)?, config)
}

#[given(r#"a "{kind}" workflow posting about "{topic}""#)]
fn post_workflow(
    world: &mut WorkflowWorld,
    kind: String,
    topic: String,
) -> Result<(), eyre::Report> {
    let mut config = Payload::new();
    config.insert("platform".to_owned(), json!("twitter"));
    config.insert("topic".to_owned(), json!(topic));
    config.insert("publish".to_owned(), json!(true));
    create_workflow(world, workflow_type(kind)?, config)
}

#[given("the workflow is deactivated")]
fn workflow_deactivated(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let id = world.current_workflow()?.id();
    let updated = run_async(
        world
            .orchestrator
            .update(id, WorkflowPatch::default().with_active(false)),
    )
    .wrap_err("deactivate workflow")?;
    world.workflow = Some(updated);
    Ok(())
}
