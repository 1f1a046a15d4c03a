//! Repository port for workflow definitions.

use crate::actor::ActorId;
use crate::workflow::domain::{Workflow, WorkflowId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow repository operations.
pub type WorkflowRepositoryResult<T> = Result<T, WorkflowRepositoryError>;

/// Workflow definition persistence contract.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Stores a new workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::DuplicateWorkflow`] when the
    /// identifier already exists.
    async fn store(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()>;

    /// Persists changes to an existing workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::NotFound`] when the workflow does
    /// not exist.
    async fn update(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()>;

    /// Finds a workflow by identifier.
    async fn find_by_id(&self, id: WorkflowId) -> WorkflowRepositoryResult<Option<Workflow>>;

    /// Lists workflows, newest first, optionally restricted to one creator.
    async fn list(&self, created_by: Option<&ActorId>) -> WorkflowRepositoryResult<Vec<Workflow>>;

    /// Deletes a workflow, returning whether a record was removed.
    async fn delete(&self, id: WorkflowId) -> WorkflowRepositoryResult<bool>;
}

/// Errors returned by workflow repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowRepositoryError {
    /// A workflow with the same identifier already exists.
    #[error("duplicate workflow identifier: {0}")]
    DuplicateWorkflow(WorkflowId),

    /// The workflow was not found.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
