//! Translation operations over the task lifecycle and the AI gateway.

use crate::actor::ActorId;
use crate::content::{
    domain::ContentId,
    ports::ContentRepository,
    services::ContentServiceError,
};
use crate::gateway::{
    domain::Translation,
    ports::{ImageGenerator, TextGenerator},
    services::AiGateway,
};
use crate::language::Language;
use crate::operation::{
    BatchItemResult, CompletedOperation, OperationError, OperationOutcome, OperationResult,
    OperationRunner, payload,
};
use crate::task::{
    domain::{NewTask, TaskArtifact, TaskId, TaskType},
    ports::TaskRepository,
};
use crate::translation::{
    domain::{NewTranslationJob, TranslationDomainError, TranslationJob, TranslationJobId},
    ports::TranslationJobRepository,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One entry of a batch translation, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    /// Text to translate.
    pub text: String,
    /// Source language code.
    pub source_language: String,
    /// Target language code.
    pub target_language: String,
}

impl TranslationItem {
    /// Creates a batch entry.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Outcome of one batch translation entry.
pub type TranslationItemResult = BatchItemResult<TranslationItem, TranslationJob>;

/// Per-language outcome of translating one piece of generated content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoTranslationReport {
    /// Translated content.
    pub content_id: ContentId,
    /// Language of the content body.
    pub source_language: Language,
    /// Outcome for every requested language other than the source.
    pub translations: BTreeMap<Language, BatchItemResult<Language, TranslationJob>>,
}

impl AutoTranslationReport {
    /// Returns how many languages were translated successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.translations
            .values()
            .filter(|outcome| outcome.is_success())
            .count()
    }
}

/// Translation service.
pub struct TranslationService<R, C, T, I>
where
    R: TaskRepository + TranslationJobRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    runner: OperationRunner<R, C>,
    store: Arc<R>,
    gateway: Arc<AiGateway<T, I>>,
}

impl<R, C, T, I> TranslationService<R, C, T, I>
where
    R: TaskRepository + TranslationJobRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Creates a translation service.
    #[must_use]
    pub const fn new(
        runner: OperationRunner<R, C>,
        store: Arc<R>,
        gateway: Arc<AiGateway<T, I>>,
    ) -> Self {
        Self {
            runner,
            store,
            gateway,
        }
    }

    /// Translates `text` and commits the completed job with its task.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Translation`] for blank text before any
    /// task is created, and the provider or commit failure otherwise.
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        created_by: ActorId,
    ) -> OperationResult<CompletedOperation<TranslationJob>> {
        if text.trim().is_empty() {
            return Err(TranslationDomainError::EmptySourceText.into());
        }
        let request = NewTask::new(TaskType::Translation, created_by).with_input(payload([
            ("text", json!(text)),
            ("source_language", json!(source)),
            ("target_language", json!(target)),
        ]));
        let clock = self.runner.clock();
        self.runner
            .run(
                request,
                self.gateway.translate(text, source, target),
                |task, translation| {
                    let job_request = NewTranslationJob {
                        task_id: task.id(),
                        source_language: source,
                        target_language: target,
                        source_text: text.to_owned(),
                    };
                    let job = completed_job(job_request, &translation, clock)
                        .map_err(OperationError::unusable_result)?;
                    Ok(OperationOutcome {
                        output_data: payload([
                            ("translated_text", json!(translation.translated_text)),
                            ("quality_score", json!(translation.quality_score)),
                            ("job_id", json!(job.id())),
                        ]),
                        model_used: translation.model_used,
                        tokens_used: translation.tokens_used,
                        artifacts: vec![TaskArtifact::Translation(job.clone())],
                        value: job,
                    })
                },
            )
            .await
    }

    /// Translates every item in order, one at a time.
    ///
    /// Item failures, including unsupported language codes, are captured
    /// next to the item that caused them.
    pub async fn batch_translate(
        &self,
        items: &[TranslationItem],
        created_by: &ActorId,
    ) -> Vec<TranslationItemResult> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let outcome = self.translate_item(item, created_by.clone()).await;
            results.push(BatchItemResult::capture(outcome, item.clone()));
        }
        tracing::info!(
            items = items.len(),
            succeeded = results.iter().filter(|result| result.is_success()).count(),
            "batch translation finished"
        );
        results
    }

    /// Translates generated content into each target language except its
    /// own.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Content`] when the content cannot be
    /// loaded; per-language failures are reported inside the report.
    pub async fn auto_translate_content(
        &self,
        content_id: ContentId,
        targets: &[Language],
        created_by: &ActorId,
    ) -> OperationResult<AutoTranslationReport> {
        let content = ContentRepository::find_by_id(&*self.store, content_id)
            .await
            .map_err(ContentServiceError::from)?
            .ok_or(ContentServiceError::NotFound(content_id))?;
        let source = content.language();
        let mut translations = BTreeMap::new();
        for &target in targets {
            if target == source || translations.contains_key(&target) {
                continue;
            }
            let outcome = self
                .translate(content.body(), source, target, created_by.clone())
                .await
                .map(|completed| completed.value);
            translations.insert(target, BatchItemResult::capture(outcome, target));
        }
        let report = AutoTranslationReport {
            content_id,
            source_language: source,
            translations,
        };
        tracing::info!(
            content_id = %content_id,
            languages = report.translations.len(),
            succeeded = report.succeeded(),
            "content auto-translated"
        );
        Ok(report)
    }

    /// Retrieves a translation job.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::TranslationJobNotFound`] for unknown jobs.
    pub async fn get_job(&self, id: TranslationJobId) -> OperationResult<TranslationJob> {
        TranslationJobRepository::find_by_id(&*self.store, id)
            .await?
            .ok_or(OperationError::TranslationJobNotFound(id))
    }

    /// Returns the jobs owned by a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::TranslationJobs`] when the lookup fails.
    pub async fn jobs_for_task(&self, task_id: TaskId) -> OperationResult<Vec<TranslationJob>> {
        Ok(self.store.list_for_task(task_id).await?)
    }

    async fn translate_item(
        &self,
        item: &TranslationItem,
        created_by: ActorId,
    ) -> OperationResult<TranslationJob> {
        let source = Language::try_from(item.source_language.as_str())?;
        let target = Language::try_from(item.target_language.as_str())?;
        let completed = self.translate(&item.text, source, target, created_by).await?;
        Ok(completed.value)
    }
}

/// Builds the completed job for a provider translation.
fn completed_job(
    request: NewTranslationJob,
    translation: &Translation,
    clock: &impl Clock,
) -> Result<TranslationJob, TranslationDomainError> {
    let mut job = TranslationJob::new(request, clock)?;
    job.begin(clock)?;
    job.complete(
        translation.translated_text.clone(),
        translation.quality_score,
        clock,
    )?;
    Ok(job)
}
