//! `auto_translate`: translates stored content into configured languages.

use crate::content::{domain::ContentId, ports::ContentRepository};
use crate::gateway::ports::{ImageGenerator, TextGenerator};
use crate::language::Language;
use crate::task::ports::TaskRepository;
use crate::translation::{ports::TranslationJobRepository, services::TranslationService};
use crate::workflow::ports::{WorkflowHandler, WorkflowHandlerError, WorkflowInvocation};
use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_TARGETS: [Language; 3] = [Language::Es, Language::Fr, Language::Pt];

/// Translates the content named by `trigger_data.content_id` into
/// `config.target_languages` (Spanish, French, and Portuguese by default).
pub struct AutoTranslateHandler<R, C, T, I>
where
    R: TaskRepository + TranslationJobRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    translations: Arc<TranslationService<R, C, T, I>>,
}

impl<R, C, T, I> AutoTranslateHandler<R, C, T, I>
where
    R: TaskRepository + TranslationJobRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(translations: Arc<TranslationService<R, C, T, I>>) -> Self {
        Self { translations }
    }
}

#[async_trait]
impl<R, C, T, I> WorkflowHandler for AutoTranslateHandler<R, C, T, I>
where
    R: TaskRepository + TranslationJobRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
{
    async fn execute(
        &self,
        invocation: &WorkflowInvocation,
    ) -> Result<Value, WorkflowHandlerError> {
        let content_id = content_id(invocation)?;
        let targets = target_languages(invocation)?;
        let report = self
            .translations
            .auto_translate_content(content_id, &targets, &invocation.triggered_by)
            .await?;
        serde_json::to_value(&report).map_err(|err| WorkflowHandlerError::Encoding(err.to_string()))
    }
}

fn content_id(invocation: &WorkflowInvocation) -> Result<ContentId, WorkflowHandlerError> {
    let raw = invocation
        .trigger_data
        .get("content_id")
        .and_then(Value::as_str)
        .ok_or_else(|| WorkflowHandlerError::InvalidTrigger("content_id is required".to_owned()))?;
    Uuid::parse_str(raw)
        .map(ContentId::from_uuid)
        .map_err(|_| {
            WorkflowHandlerError::InvalidTrigger(format!("content_id '{raw}' is not a UUID"))
        })
}

fn target_languages(
    invocation: &WorkflowInvocation,
) -> Result<Vec<Language>, WorkflowHandlerError> {
    let Some(configured) = invocation.workflow.config().get("target_languages") else {
        return Ok(DEFAULT_TARGETS.to_vec());
    };
    let codes = configured.as_array().ok_or_else(|| {
        WorkflowHandlerError::InvalidConfig("target_languages must be a list".to_owned())
    })?;
    codes
        .iter()
        .map(|code| {
            let text = code.as_str().ok_or_else(|| {
                WorkflowHandlerError::InvalidConfig(format!(
                    "target language {code} is not a string"
                ))
            })?;
            Language::try_from(text)
                .map_err(|err| WorkflowHandlerError::InvalidConfig(err.to_string()))
        })
        .collect()
}
