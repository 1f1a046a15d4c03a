//! Repository port for generated content lookup and editorial updates.

use crate::content::domain::{ContentId, ContentType, GeneratedContent};
use crate::language::Language;
use crate::paging::Page;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for content repository operations.
pub type ContentRepositoryResult<T> = Result<T, ContentRepositoryError>;

/// Equality filters applied when listing generated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    /// Owning task.
    pub task_id: Option<TaskId>,
    /// Content type.
    pub content_type: Option<ContentType>,
    /// Content language.
    pub language: Option<Language>,
    /// Target platform.
    pub platform: Option<String>,
    /// Publication flag.
    pub published: Option<bool>,
}

impl ContentFilter {
    /// Restricts results to content owned by `task_id`.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts results to one content type.
    #[must_use]
    pub const fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Restricts results to one language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Restricts results to one platform.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Restricts results by publication flag.
    #[must_use]
    pub const fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    /// Returns whether `content` satisfies every set filter.
    #[must_use]
    pub fn matches(&self, content: &GeneratedContent) -> bool {
        self.task_id.is_none_or(|id| id == content.task_id())
            && self
                .content_type
                .is_none_or(|kind| kind == content.content_type())
            && self.language.is_none_or(|lang| lang == content.language())
            && self
                .platform
                .as_deref()
                .is_none_or(|platform| content.platform() == Some(platform))
            && self
                .published
                .is_none_or(|flag| flag == content.is_published())
    }
}

/// Aggregate counts over generated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStatistics {
    /// Total records.
    pub total: u64,
    /// Records per content type.
    pub by_type: BTreeMap<ContentType, u64>,
    /// Published records.
    pub published_count: u64,
}

impl ContentStatistics {
    /// Counts one record.
    pub fn record(&mut self, content_type: ContentType, published: bool) {
        self.total += 1;
        *self.by_type.entry(content_type).or_default() += 1;
        if published {
            self.published_count += 1;
        }
    }
}

/// Generated content persistence contract.
///
/// Content is inserted only alongside its completed task through
/// [`crate::task::ports::TaskRepository::commit_completion`].
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds content by identifier.
    async fn find_by_id(&self, id: ContentId) -> ContentRepositoryResult<Option<GeneratedContent>>;

    /// Lists content matching `filter`, newest first.
    async fn list(
        &self,
        filter: &ContentFilter,
        page: Page,
    ) -> ContentRepositoryResult<Vec<GeneratedContent>>;

    /// Persists changes to existing content.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::NotFound`] when the content does not
    /// exist.
    async fn update(&self, content: &GeneratedContent) -> ContentRepositoryResult<()>;

    /// Deletes content, returning whether a record was removed.
    async fn delete(&self, id: ContentId) -> ContentRepositoryResult<bool>;

    /// Aggregates counts over all content.
    async fn statistics(&self) -> ContentRepositoryResult<ContentStatistics>;
}

/// Errors returned by content repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ContentRepositoryError {
    /// The content was not found.
    #[error("content not found: {0}")]
    NotFound(ContentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
