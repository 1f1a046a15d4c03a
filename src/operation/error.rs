//! Errors surfaced by domain operations.

use crate::content::{domain::ContentDomainError, services::ContentServiceError};
use crate::error::ErrorKind;
use crate::gateway::domain::{GatewayError, UnsupportedEnhancementError, UnsupportedImageSizeError};
use crate::language::UnsupportedLanguageError;
use crate::task::{domain::TaskId, services::TaskLifecycleError};
use crate::template::{domain::TemplateError, services::TemplateServiceError};
use crate::translation::{
    domain::{TranslationDomainError, TranslationJobId},
    ports::TranslationJobRepositoryError,
};
use thiserror::Error;

/// Failure of a generation, translation, enhancement, or image operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A language code outside the supported set.
    #[error(transparent)]
    Language(#[from] UnsupportedLanguageError),
    /// An enhancement kind outside the supported set.
    #[error(transparent)]
    Enhancement(#[from] UnsupportedEnhancementError),
    /// An image size outside the supported set.
    #[error(transparent)]
    ImageSize(#[from] UnsupportedImageSizeError),
    /// Any other rejected input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Translation job validation failed.
    #[error(transparent)]
    Translation(#[from] TranslationDomainError),
    /// Generated content validation failed.
    #[error(transparent)]
    ContentBody(#[from] ContentDomainError),
    /// Template rendering failed.
    #[error(transparent)]
    TemplateRender(#[from] TemplateError),
    /// Template lookup failed.
    #[error(transparent)]
    Template(#[from] TemplateServiceError),
    /// Content lookup failed.
    #[error(transparent)]
    Content(#[from] ContentServiceError),
    /// Translation job lookup failed.
    #[error(transparent)]
    TranslationJobs(#[from] TranslationJobRepositoryError),
    /// The referenced translation job does not exist.
    #[error("translation job not found: {0}")]
    TranslationJobNotFound(TranslationJobId),
    /// Task lifecycle bookkeeping failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// The provider call failed or timed out.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The provider answered, but its reply could not be turned into a
    /// result.
    #[error("unusable provider result: {0}")]
    UnusableResult(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The task was rejected while its provider call was running.
    #[error("task {0} was cancelled")]
    Cancelled(TaskId),
}

impl OperationError {
    /// Wraps a failure to build a result from a provider reply.
    #[must_use]
    pub fn unusable_result(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UnusableResult(Box::new(err))
    }

    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Language(_)
            | Self::Enhancement(_)
            | Self::ImageSize(_)
            | Self::InvalidInput(_)
            | Self::Translation(_)
            | Self::ContentBody(_)
            | Self::TemplateRender(_)
            | Self::Cancelled(_) => ErrorKind::Validation,
            Self::TranslationJobNotFound(_) => ErrorKind::NotFound,
            Self::TranslationJobs(_) => ErrorKind::Internal,
            Self::Template(err) => err.kind(),
            Self::Content(err) => err.kind(),
            Self::Task(err) => err.kind(),
            Self::Gateway(err) => err.kind(),
            Self::UnusableResult(_) => ErrorKind::Provider,
        }
    }
}

/// Result type for domain operations.
pub type OperationResult<T> = Result<T, OperationError>;
