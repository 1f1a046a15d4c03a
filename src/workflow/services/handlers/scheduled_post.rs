//! `scheduled_post`: generates a social post from the workflow config and
//! optionally publishes it.

use crate::content::ports::ContentRepository;
use crate::gateway::ports::{ImageGenerator, TextGenerator};
use crate::generation::{
    domain::{ContentBrief, GenerationRequest, SocialPostBrief},
    services::ContentGenerationService,
};
use crate::language::Language;
use crate::publishing::{
    domain::PublishOptions, ports::Publisher, services::PublishingService,
};
use crate::task::ports::TaskRepository;
use crate::template::{domain::TemplateId, ports::TemplateRepository};
use crate::workflow::ports::{WorkflowHandler, WorkflowHandlerError, WorkflowInvocation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScheduledPostConfig {
    platform: String,
    topic: Option<String>,
    tone: String,
    max_length: u32,
    include_hashtags: bool,
    template_id: Option<TemplateId>,
    language: Language,
    publish: bool,
    media_urls: Vec<String>,
    schedule_time: Option<DateTime<Utc>>,
}

impl Default for ScheduledPostConfig {
    fn default() -> Self {
        Self {
            platform: "facebook".to_owned(),
            topic: None,
            tone: "professional".to_owned(),
            max_length: 500,
            include_hashtags: true,
            template_id: None,
            language: Language::default(),
            publish: false,
            media_urls: Vec::new(),
            schedule_time: None,
        }
    }
}

/// Generates one social post per trigger using the workflow configuration
/// as the brief; `publish: true` hands the post to the publisher.
pub struct ScheduledPostHandler<R, C, T, I, P, B>
where
    R: TaskRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
    P: TemplateRepository,
    B: Publisher,
{
    generation: Arc<ContentGenerationService<R, C, T, I, P>>,
    publishing: Arc<PublishingService<R, C, B>>,
}

impl<R, C, T, I, P, B> ScheduledPostHandler<R, C, T, I, P, B>
where
    R: TaskRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
    P: TemplateRepository,
    B: Publisher,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(
        generation: Arc<ContentGenerationService<R, C, T, I, P>>,
        publishing: Arc<PublishingService<R, C, B>>,
    ) -> Self {
        Self {
            generation,
            publishing,
        }
    }
}

#[async_trait]
impl<R, C, T, I, P, B> WorkflowHandler for ScheduledPostHandler<R, C, T, I, P, B>
where
    R: TaskRepository + ContentRepository,
    C: Clock + Send + Sync,
    T: TextGenerator,
    I: ImageGenerator,
    P: TemplateRepository,
    B: Publisher,
{
    async fn execute(
        &self,
        invocation: &WorkflowInvocation,
    ) -> Result<Value, WorkflowHandlerError> {
        let config: ScheduledPostConfig =
            serde_json::from_value(Value::Object(invocation.workflow.config().clone()))
                .map_err(|err| WorkflowHandlerError::InvalidConfig(err.to_string()))?;
        let topic = config
            .topic
            .filter(|topic| !topic.trim().is_empty())
            .ok_or_else(|| WorkflowHandlerError::InvalidConfig("topic is required".to_owned()))?;
        let brief = SocialPostBrief::new(config.platform, topic)
            .with_tone(config.tone)
            .with_max_length(config.max_length)
            .with_hashtags(config.include_hashtags);
        let mut request =
            GenerationRequest::new(ContentBrief::SocialPost(brief)).with_language(config.language);
        request.template_id = config.template_id;

        let generated = self
            .generation
            .generate(request, invocation.triggered_by.clone())
            .await?;
        let content_id = generated.value.id();
        let confirmation = if config.publish {
            let mut options = PublishOptions::default().with_media_urls(config.media_urls);
            options.schedule_time = config.schedule_time;
            let published = self.publishing.publish_content(content_id, options).await?;
            Some(published.confirmation)
        } else {
            None
        };
        Ok(json!({
            "task_id": generated.task_id(),
            "content_id": content_id,
            "text": generated.value.body(),
            "published": confirmation.is_some(),
            "external_id": confirmation.and_then(|confirmed| confirmed.external_id),
        }))
    }
}
