//! Publishes stored content downstream and records the marker.

use crate::content::{
    domain::{ContentId, GeneratedContent},
    ports::ContentRepository,
    services::{ContentService, ContentServiceError},
};
use crate::error::ErrorKind;
use crate::publishing::{
    domain::{PublishConfirmation, PublishOptions, PublishRequest},
    ports::{PublishError, Publisher},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for publishing.
#[derive(Debug, Error)]
pub enum PublishingServiceError {
    /// Content lookup or marker update failed.
    #[error(transparent)]
    Content(#[from] ContentServiceError),
    /// The downstream service rejected or never received the post.
    #[error(transparent)]
    Publish(#[from] PublishError),
    /// Neither the content nor the options name a platform.
    #[error("no platform to publish content {0} to")]
    MissingPlatform(ContentId),
    /// The content already carries a publication marker.
    #[error("content already published: {0}")]
    AlreadyPublished(ContentId),
}

impl PublishingServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Content(err) => err.kind(),
            Self::Publish(err) => err.kind(),
            Self::MissingPlatform(_) | Self::AlreadyPublished(_) => ErrorKind::Validation,
        }
    }
}

/// Content that was handed downstream and marked as published.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedContent {
    /// Content with its publication marker.
    pub content: GeneratedContent,
    /// Downstream acknowledgement.
    pub confirmation: PublishConfirmation,
}

/// Publishes generated content through a [`Publisher`].
pub struct PublishingService<R, C, P>
where
    R: ContentRepository,
    C: Clock + Send + Sync,
    P: Publisher,
{
    content: Arc<ContentService<R, C>>,
    publisher: Arc<P>,
}

impl<R, C, P> PublishingService<R, C, P>
where
    R: ContentRepository,
    C: Clock + Send + Sync,
    P: Publisher,
{
    /// Creates a publishing service.
    #[must_use]
    pub const fn new(content: Arc<ContentService<R, C>>, publisher: Arc<P>) -> Self {
        Self { content, publisher }
    }

    /// Publishes `content_id` and records the returned external identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PublishingServiceError::Content`] for unknown content,
    /// [`PublishingServiceError::MissingPlatform`] or
    /// [`PublishingServiceError::AlreadyPublished`] for content that cannot
    /// be posted, and [`PublishingServiceError::Publish`] when the
    /// downstream call fails.
    pub async fn publish_content(
        &self,
        content_id: ContentId,
        options: PublishOptions,
    ) -> Result<PublishedContent, PublishingServiceError> {
        let content = self.content.get(content_id).await?;
        if content.is_published() {
            return Err(PublishingServiceError::AlreadyPublished(content_id));
        }
        let platform = options
            .platform
            .or_else(|| content.platform().map(str::to_owned))
            .ok_or(PublishingServiceError::MissingPlatform(content_id))?;
        let request = PublishRequest {
            platform,
            content: content.body().to_owned(),
            media_urls: options.media_urls,
            schedule_time: options.schedule_time,
        };

        let confirmation = self.publisher.publish(&request).await.map_err(|err| {
            tracing::error!(
                content_id = %content_id,
                platform = %request.platform,
                error = %err,
                "publish failed"
            );
            err
        })?;
        let published = self
            .content
            .publish(content_id, confirmation.external_id.clone())
            .await?;
        tracing::info!(
            content_id = %content_id,
            platform = %request.platform,
            external_id = confirmation.external_id.as_deref().unwrap_or_default(),
            scheduled = request.schedule_time.is_some(),
            "content published"
        );
        Ok(PublishedContent {
            content: published,
            confirmation,
        })
    }
}
