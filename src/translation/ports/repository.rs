//! Repository port for translation job reads.

use crate::task::domain::TaskId;
use crate::translation::domain::{TranslationJob, TranslationJobId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for translation job repository operations.
pub type TranslationJobRepositoryResult<T> = Result<T, TranslationJobRepositoryError>;

/// Translation job lookup contract.
///
/// Jobs are inserted only alongside their completed task through
/// [`crate::task::ports::TaskRepository::commit_completion`].
#[async_trait]
pub trait TranslationJobRepository: Send + Sync {
    /// Finds a job by identifier.
    async fn find_by_id(
        &self,
        id: TranslationJobId,
    ) -> TranslationJobRepositoryResult<Option<TranslationJob>>;

    /// Returns every job owned by `task_id`, oldest first.
    async fn list_for_task(&self, task_id: TaskId)
    -> TranslationJobRepositoryResult<Vec<TranslationJob>>;
}

/// Errors returned by translation job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TranslationJobRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TranslationJobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
