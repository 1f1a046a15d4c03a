//! Append-only execution history port.

use crate::workflow::domain::{WorkflowExecution, WorkflowId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for execution history operations.
pub type ExecutionHistoryResult<T> = Result<T, ExecutionHistoryError>;

/// Execution history contract. Entries are never updated or removed.
#[async_trait]
pub trait ExecutionHistory: Send + Sync {
    /// Appends one execution.
    async fn append(&self, execution: &WorkflowExecution) -> ExecutionHistoryResult<()>;

    /// Returns the last `limit` executions of a workflow, oldest first.
    async fn recent(
        &self,
        workflow_id: WorkflowId,
        limit: usize,
    ) -> ExecutionHistoryResult<Vec<WorkflowExecution>>;
}

/// Errors returned by execution history implementations.
#[derive(Debug, Clone, Error)]
pub enum ExecutionHistoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExecutionHistoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
