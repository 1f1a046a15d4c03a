//! Enhancement operations over the task lifecycle and the AI gateway.

use crate::actor::ActorId;
use crate::gateway::{
    domain::{Enhancement, EnhancementKind},
    ports::{ImageGenerator, TextGenerator},
    services::AiGateway,
};
use crate::operation::{
    BatchItemResult, CompletedOperation, OperationError, OperationOutcome, OperationResult,
    OperationRunner, payload,
};
use crate::task::{
    domain::{NewTask, TaskType},
    ports::TaskRepository,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// One entry of a batch enhancement, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementItem {
    /// Text to edit.
    pub text: String,
    /// Requested enhancement kind.
    pub enhancement_type: String,
    /// Kind-specific context such as a tone or keywords.
    pub context: Option<String>,
}

impl EnhancementItem {
    /// Creates a batch entry without context.
    #[must_use]
    pub fn new(text: impl Into<String>, enhancement_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enhancement_type: enhancement_type.into(),
            context: None,
        }
    }

    /// Sets the kind-specific context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Outcome of one batch enhancement entry.
pub type EnhancementItemResult = BatchItemResult<EnhancementItem, Enhancement>;

/// Text enhancement service.
pub struct EnhancementService<R, C, T, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    runner: OperationRunner<R, C>,
    gateway: Arc<AiGateway<T, I>>,
}

impl<R, C, T, I> EnhancementService<R, C, T, I>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Creates an enhancement service.
    #[must_use]
    pub const fn new(runner: OperationRunner<R, C>, gateway: Arc<AiGateway<T, I>>) -> Self {
        Self { runner, gateway }
    }

    /// Applies `kind` to `text`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for blank text before any
    /// task is created, and the provider or commit failure otherwise.
    pub async fn enhance(
        &self,
        text: &str,
        kind: EnhancementKind,
        context: Option<&str>,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<Enhancement>> {
        if text.trim().is_empty() {
            return Err(OperationError::InvalidInput(
                "text to enhance must not be empty".to_owned(),
            ));
        }
        let request = NewTask::new(TaskType::Enhancement, created_by).with_input(payload([
            ("text", json!(text)),
            ("enhancement_type", json!(kind)),
            ("context", json!(context)),
        ]));
        self.runner
            .run(
                request,
                self.gateway.enhance(text, kind, context),
                |_, enhancement: Enhancement| {
                    Ok(OperationOutcome {
                        output_data: payload([
                            ("enhanced_text", json!(enhancement.enhanced_text)),
                            ("changes_made", json!(enhancement.changes_made)),
                        ]),
                        model_used: enhancement.model_used.clone(),
                        tokens_used: enhancement.tokens_used,
                        artifacts: Vec::new(),
                        value: enhancement,
                    })
                },
            )
            .await
    }

    /// Fixes grammar, spelling, and punctuation.
    ///
    /// # Errors
    ///
    /// See [`Self::enhance`].
    pub async fn fix_grammar(
        &self,
        text: &str,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<Enhancement>> {
        self.enhance(text, EnhancementKind::Grammar, None, created_by)
            .await
    }

    /// Rewrites `text` in `target_tone`.
    ///
    /// # Errors
    ///
    /// See [`Self::enhance`].
    pub async fn adjust_tone(
        &self,
        text: &str,
        target_tone: &str,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<Enhancement>> {
        self.enhance(text, EnhancementKind::Tone, Some(target_tone), created_by)
            .await
    }

    /// Optimises `text` for search, weaving in `keywords` when given.
    ///
    /// # Errors
    ///
    /// See [`Self::enhance`].
    pub async fn optimize_seo(
        &self,
        text: &str,
        keywords: &[String],
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<Enhancement>> {
        let joined = keywords.join(", ");
        let context = (!keywords.is_empty()).then_some(joined.as_str());
        self.enhance(text, EnhancementKind::Seo, context, created_by)
            .await
    }

    /// Summarises `text`, optionally within `max_words`.
    ///
    /// # Errors
    ///
    /// See [`Self::enhance`].
    pub async fn summarize(
        &self,
        text: &str,
        max_words: Option<u32>,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<Enhancement>> {
        let limit = max_words.map(|words| format!("Maximum {words} words"));
        self.enhance(text, EnhancementKind::Summarize, limit.as_deref(), created_by)
            .await
    }

    /// Enhances every item in order; item failures are captured next to
    /// their input.
    pub async fn batch_enhance(
        &self,
        items: &[EnhancementItem],
        created_by: &ActorId,
    ) -> Vec<EnhancementItemResult> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let outcome = self.enhance_item(item, created_by.clone()).await;
            results.push(BatchItemResult::capture(outcome, item.clone()));
        }
        tracing::info!(
            items = items.len(),
            succeeded = results.iter().filter(|result| result.is_success()).count(),
            "batch enhancement finished"
        );
        results
    }

    async fn enhance_item(
        &self,
        item: &EnhancementItem,
        created_by: ActorId,
    ) -> OperationResult<Enhancement> {
        let kind = EnhancementKind::try_from(item.enhancement_type.as_str())?;
        let completed = self
            .enhance(&item.text, kind, item.context.as_deref(), created_by)
            .await?;
        Ok(completed.value)
    }
}
