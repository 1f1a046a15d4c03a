//! Image generation over the task lifecycle and the gateway.

use crate::actor::ActorId;
use crate::gateway::{
    domain::{GeneratedImage, ImageSize},
    ports::{ImageGenerator, TextGenerator},
    services::AiGateway,
};
use crate::operation::{
    CompletedOperation, OperationError, OperationOutcome, OperationResult, OperationRunner,
    payload,
};
use crate::task::{
    domain::{NewTask, TaskType},
    ports::TaskRepository,
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;

/// Generates images as approval-gated tasks.
pub struct ImageGenerationService<R, C, T, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    runner: OperationRunner<R, C>,
    gateway: Arc<AiGateway<T, I>>,
}

impl<R, C, T, I> ImageGenerationService<R, C, T, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Creates an image generation service.
    #[must_use]
    pub const fn new(runner: OperationRunner<R, C>, gateway: Arc<AiGateway<T, I>>) -> Self {
        Self { runner, gateway }
    }

    /// Generates an image for `prompt` at `size`.
    ///
    /// `style` is recorded with the task input only.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank prompt or an unsupported size
    /// before any task is created, and the backend or commit failure
    /// otherwise.
    pub async fn generate(
        &self,
        prompt: &str,
        size: &str,
        style: Option<&str>,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<GeneratedImage>> {
        if prompt.trim().is_empty() {
            return Err(OperationError::InvalidInput(
                "image prompt must not be empty".to_owned(),
            ));
        }
        let image_size = ImageSize::try_from(size)?;
        let request = NewTask::new(TaskType::ImageGeneration, created_by)
            .with_input(payload([
                ("prompt", json!(prompt)),
                ("size", json!(image_size)),
                ("style", json!(style)),
            ]))
            .with_prompt(prompt);
        let completed = self
            .runner
            .run(
                request,
                self.gateway.generate_image(prompt, image_size),
                |_, image: GeneratedImage| {
                    Ok(OperationOutcome {
                        output_data: payload([
                            ("image_url", json!(image.image_url)),
                            ("size", json!(image.size)),
                            ("format", json!(image.format)),
                        ]),
                        model_used: image.model_used.clone(),
                        tokens_used: 0,
                        artifacts: Vec::new(),
                        value: image,
                    })
                },
            )
            .await?;
        tracing::info!(task_id = %completed.task_id(), size = %image_size, "image generated");
        Ok(completed)
    }
}
