//! Service layer for reading, editing, and publishing generated content.

use crate::content::{
    domain::{ContentDomainError, ContentId, ContentPatch, GeneratedContent},
    ports::{ContentFilter, ContentRepository, ContentRepositoryError, ContentStatistics},
};
use crate::error::ErrorKind;
use crate::paging::Page;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for content operations.
#[derive(Debug, Error)]
pub enum ContentServiceError {
    /// Content validation failed.
    #[error(transparent)]
    Domain(#[from] ContentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ContentRepositoryError),
    /// The referenced content does not exist.
    #[error("content not found: {0}")]
    NotFound(ContentId),
}

impl ContentServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(ContentRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(ContentRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for content service operations.
pub type ContentServiceResult<T> = Result<T, ContentServiceError>;

/// Generated content management service.
#[derive(Clone)]
pub struct ContentService<R, C>
where
    R: ContentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ContentService<R, C>
where
    R: ContentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new content service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Retrieves content by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::NotFound`] when the content does not
    /// exist.
    pub async fn get(&self, id: ContentId) -> ContentServiceResult<GeneratedContent> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ContentServiceError::NotFound(id))
    }

    /// Lists content matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::Repository`] when the query fails.
    pub async fn list(
        &self,
        filter: &ContentFilter,
        page: Page,
    ) -> ContentServiceResult<Vec<GeneratedContent>> {
        Ok(self.repository.list(filter, page).await?)
    }

    /// Applies an editorial update.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::NotFound`] for unknown content and
    /// [`ContentServiceError::Domain`] when the replacement body is blank.
    pub async fn update(
        &self,
        id: ContentId,
        patch: ContentPatch,
    ) -> ContentServiceResult<GeneratedContent> {
        let mut content = self.get(id).await?;
        content.apply(patch, &*self.clock)?;
        self.repository.update(&content).await?;
        tracing::info!(content_id = %id, "content updated");
        Ok(content)
    }

    /// Marks content as published, recording the downstream identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::NotFound`] for unknown content.
    pub async fn publish(
        &self,
        id: ContentId,
        external_id: Option<String>,
    ) -> ContentServiceResult<GeneratedContent> {
        let mut content = self.get(id).await?;
        content.publish(external_id, &*self.clock);
        self.repository.update(&content).await?;
        tracing::info!(content_id = %id, "content marked as published");
        Ok(content)
    }

    /// Deletes content.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::NotFound`] when nothing was deleted.
    pub async fn delete(&self, id: ContentId) -> ContentServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ContentServiceError::NotFound(id));
        }
        tracing::info!(content_id = %id, "content deleted");
        Ok(())
    }

    /// Aggregates content counts.
    ///
    /// # Errors
    ///
    /// Returns [`ContentServiceError::Repository`] when the query fails.
    pub async fn statistics(&self) -> ContentServiceResult<ContentStatistics> {
        Ok(self.repository.statistics().await?)
    }
}
