//! Service layer for template CRUD, suggestions, and rendering.

use crate::actor::ActorId;
use crate::content::domain::ContentType;
use crate::error::ErrorKind;
use crate::language::Language;
use crate::paging::Page;
use crate::template::{
    domain::{
        ContentTemplate, NewTemplate, TemplateError, TemplateId, TemplatePatch, VariableValues,
    },
    ports::{TemplateFilter, TemplateRepository, TemplateRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of templates returned by [`TemplateService::suggest`].
pub const SUGGESTION_LIMIT: usize = 5;

/// Service-level errors for template operations.
#[derive(Debug, Error)]
pub enum TemplateServiceError {
    /// Template validation or rendering failed.
    #[error(transparent)]
    Domain(#[from] TemplateError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TemplateRepositoryError),
    /// The referenced template does not exist.
    #[error("template not found: {0}")]
    NotFound(TemplateId),
    /// The template exists but has been deactivated.
    #[error("template is inactive: {0}")]
    Inactive(TemplateId),
}

impl TemplateServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Inactive(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TemplateRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for template service operations.
pub type TemplateServiceResult<T> = Result<T, TemplateServiceError>;

/// Template management service.
#[derive(Clone)]
pub struct TemplateService<R, C>
where
    R: TemplateRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TemplateService<R, C>
where
    R: TemplateRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new template service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates an active template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Domain`] for an invalid name or prompt.
    pub async fn create(&self, request: NewTemplate) -> TemplateServiceResult<ContentTemplate> {
        let template = ContentTemplate::new(request, &*self.clock)?;
        self.repository.store(&template).await?;
        tracing::info!(
            template_id = %template.id(),
            template_type = %template.template_type(),
            variables = template.variables().len(),
            "template created"
        );
        Ok(template)
    }

    /// Retrieves a template by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::NotFound`] when the template does not
    /// exist.
    pub async fn get(&self, id: TemplateId) -> TemplateServiceResult<ContentTemplate> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TemplateServiceError::NotFound(id))
    }

    /// Retrieves a template that may be used for generation.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::NotFound`] for unknown templates and
    /// [`TemplateServiceError::Inactive`] for deactivated ones.
    pub async fn get_active(&self, id: TemplateId) -> TemplateServiceResult<ContentTemplate> {
        let template = self.get(id).await?;
        if !template.is_active() {
            return Err(TemplateServiceError::Inactive(id));
        }
        Ok(template)
    }

    /// Applies an update; a new prompt re-derives the variable set.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::NotFound`] for unknown templates and
    /// [`TemplateServiceError::Domain`] for invalid replacement values.
    pub async fn update(
        &self,
        id: TemplateId,
        patch: TemplatePatch,
    ) -> TemplateServiceResult<ContentTemplate> {
        let mut template = self.get(id).await?;
        template.apply(patch, &*self.clock)?;
        self.repository.update(&template).await?;
        tracing::info!(template_id = %id, "template updated");
        Ok(template)
    }

    /// Lists templates matching `filter`, most used first.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Repository`] when the query fails.
    pub async fn list(
        &self,
        filter: &TemplateFilter,
        page: Page,
    ) -> TemplateServiceResult<Vec<ContentTemplate>> {
        Ok(self.repository.list(filter, page).await?)
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::NotFound`] when nothing was deleted.
    pub async fn delete(&self, id: TemplateId, deleted_by: &ActorId) -> TemplateServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TemplateServiceError::NotFound(id));
        }
        tracing::info!(template_id = %id, deleted_by = %deleted_by, "template deleted");
        Ok(())
    }

    /// Records one use of a template and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Repository`] when the template does
    /// not exist or the update fails.
    pub async fn increment_usage(&self, id: TemplateId) -> TemplateServiceResult<u64> {
        Ok(self.repository.increment_usage(id).await?)
    }

    /// Returns up to [`SUGGESTION_LIMIT`] active templates for a content
    /// type and language, most used first.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Repository`] when the query fails.
    pub async fn suggest(
        &self,
        content_type: ContentType,
        language: Language,
    ) -> TemplateServiceResult<Vec<ContentTemplate>> {
        let filter = TemplateFilter::default()
            .with_template_type(content_type)
            .with_language(language);
        self.list(&filter, Page::new(0, SUGGESTION_LIMIT)).await
    }

    /// Renders a stored template without recording a use.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::NotFound`] for unknown templates and
    /// [`TemplateServiceError::Domain`] naming the first missing variable.
    pub async fn render_template(
        &self,
        id: TemplateId,
        values: &VariableValues,
    ) -> TemplateServiceResult<String> {
        let template = self.get(id).await?;
        Ok(template.render(values)?)
    }
}
