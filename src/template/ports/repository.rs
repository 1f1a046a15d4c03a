//! Repository port for content template persistence.

use crate::content::domain::ContentType;
use crate::language::Language;
use crate::paging::Page;
use crate::template::domain::{ContentTemplate, TemplateId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template repository operations.
pub type TemplateRepositoryResult<T> = Result<T, TemplateRepositoryError>;

/// Equality filters applied when listing templates.
///
/// The default filter returns active templates only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Content type produced by the template.
    pub template_type: Option<ContentType>,
    /// Template language.
    pub language: Option<Language>,
    /// Target platform.
    pub platform: Option<String>,
    /// Activation flag; `None` matches both.
    pub is_active: Option<bool>,
}

impl Default for TemplateFilter {
    fn default() -> Self {
        Self {
            template_type: None,
            language: None,
            platform: None,
            is_active: Some(true),
        }
    }
}

impl TemplateFilter {
    /// Restricts results to one content type.
    #[must_use]
    pub const fn with_template_type(mut self, template_type: ContentType) -> Self {
        self.template_type = Some(template_type);
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

    /// Restricts results by activation flag, or lifts the restriction with
    /// `None`.
    #[must_use]
    pub const fn with_active(mut self, is_active: Option<bool>) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns whether `template` satisfies every set filter.
    #[must_use]
    pub fn matches(&self, template: &ContentTemplate) -> bool {
        self.template_type
            .is_none_or(|kind| kind == template.template_type())
            && self.language.is_none_or(|lang| lang == template.language())
            && self
                .platform
                .as_deref()
                .is_none_or(|platform| template.platform() == Some(platform))
            && self
                .is_active
                .is_none_or(|flag| flag == template.is_active())
    }
}

/// Template persistence contract.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Stores a new template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::DuplicateTemplate`] when the
    /// identifier already exists.
    async fn store(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()>;

    /// Persists changes to an existing template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::NotFound`] when the template does
    /// not exist.
    async fn update(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()>;

    /// Finds a template by identifier.
    async fn find_by_id(&self, id: TemplateId) -> TemplateRepositoryResult<Option<ContentTemplate>>;

    /// Lists templates matching `filter`, most used first and then newest
    /// first.
    async fn list(
        &self,
        filter: &TemplateFilter,
        page: Page,
    ) -> TemplateRepositoryResult<Vec<ContentTemplate>>;

    /// Deletes a template, returning whether a record was removed.
    async fn delete(&self, id: TemplateId) -> TemplateRepositoryResult<bool>;

    /// Atomically adds one to the usage counter and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::NotFound`] when the template does
    /// not exist.
    async fn increment_usage(&self, id: TemplateId) -> TemplateRepositoryResult<u64>;
}

/// Errors returned by template repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TemplateRepositoryError {
    /// A template with the same identifier already exists.
    #[error("duplicate template identifier: {0}")]
    DuplicateTemplate(TemplateId),

    /// The template was not found.
    #[error("template not found: {0}")]
    NotFound(TemplateId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
