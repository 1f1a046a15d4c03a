//! Content generation over the task lifecycle, templates, and the gateway.

use crate::actor::ActorId;
use crate::content::domain::{GeneratedContent, NewGeneratedContent};
use crate::gateway::{
    ports::{ImageGenerator, TextGenerator},
    services::AiGateway,
};
use crate::generation::domain::{ContentBrief, GenerationRequest, SocialPostBrief};
use crate::operation::{
    CompletedOperation, OperationError, OperationOutcome, OperationResult, OperationRunner,
    payload,
};
use crate::task::{
    domain::{NewTask, TaskArtifact, TaskType},
    ports::TaskRepository,
};
use crate::template::{
    domain::TemplateId, ports::TemplateRepository, services::TemplateService,
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;

/// Generates content from briefs or stored templates.
pub struct ContentGenerationService<R, C, T, I, P>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
    P: TemplateRepository,
{
    runner: OperationRunner<R, C>,
    gateway: Arc<AiGateway<T, I>>,
    templates: Arc<TemplateService<P, C>>,
}

impl<R, C, T, I, P> ContentGenerationService<R, C, T, I, P>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
    P: TemplateRepository,
{
    /// Creates a content generation service.
    #[must_use]
    pub const fn new(
        runner: OperationRunner<R, C>,
        gateway: Arc<AiGateway<T, I>>,
        templates: Arc<TemplateService<P, C>>,
    ) -> Self {
        Self {
            runner,
            gateway,
            templates,
        }
    }

    /// Generates content for `request` and commits it with its task.
    ///
    /// With a template, the template must be active and every placeholder
    /// must be supplied by the brief; both are checked before a task is
    /// created. The template's usage counter is incremented after a
    /// successful commit.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid brief or template,
    /// [`OperationError::UnusableResult`] for a blank provider reply, and
    /// the provider or commit failure otherwise.
    pub async fn generate(
        &self,
        request: GenerationRequest,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<GeneratedContent>> {
        let GenerationRequest {
            brief,
            language,
            template_id,
        } = request;
        brief.validate()?;
        let prompt = match template_id {
            Some(id) => self.templates.get_active(id).await?.render(&brief.variables())?,
            None => brief.prompt()?,
        };
        let text_request = brief.text_request(&prompt);

        let mut input = brief.input_data()?;
        input.insert("language".to_owned(), json!(language));
        if let Some(id) = template_id {
            input.insert("template_id".to_owned(), json!(id));
        }
        let task = NewTask::new(TaskType::Generation, created_by)
            .with_input(input)
            .with_prompt(prompt);

        let clock = self.runner.clock();
        let brief_ref = &brief;
        let completed = self
            .runner
            .run(
                task,
                self.gateway.generate_text(&text_request),
                |task, response| {
                    let content = GeneratedContent::new(
                        NewGeneratedContent {
                            task_id: task.id(),
                            content_type: brief_ref.content_type(),
                            title: brief_ref.title(),
                            body: response.text,
                            language,
                            platform: brief_ref.platform(),
                            metadata: brief_ref.metadata(),
                            quality_score: None,
                        },
                        clock,
                    )
                    .map_err(OperationError::unusable_result)?;
                    Ok(OperationOutcome {
                        output_data: payload([
                            ("text", json!(content.body())),
                            ("content_id", json!(content.id())),
                        ]),
                        model_used: response.model_used,
                        tokens_used: response.tokens_used,
                        artifacts: vec![TaskArtifact::Content(content.clone())],
                        value: content,
                    })
                },
            )
            .await?;

        if let Some(id) = template_id {
            self.record_template_use(id).await;
        }
        tracing::info!(
            task_id = %completed.task_id(),
            content_id = %completed.value.id(),
            content_type = %brief.content_type(),
            "content generated"
        );
        Ok(completed)
    }

    /// Generates a social media post, optionally from a stored template.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub async fn generate_social_post(
        &self,
        brief: SocialPostBrief,
        template_id: Option<TemplateId>,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<GeneratedContent>> {
        let mut request = GenerationRequest::new(ContentBrief::SocialPost(brief));
        request.template_id = template_id;
        self.generate(request, created_by).await
    }

    async fn record_template_use(&self, id: TemplateId) {
        if let Err(err) = self.templates.increment_usage(id).await {
            tracing::warn!(template_id = %id, error = %err, "template usage was not recorded");
        }
    }
}
