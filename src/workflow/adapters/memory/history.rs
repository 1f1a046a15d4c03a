//! In-memory execution history.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{WorkflowExecution, WorkflowId},
    ports::{ExecutionHistory, ExecutionHistoryError, ExecutionHistoryResult},
};

/// Append-only execution log shared by every workflow.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutionHistory {
    executions: Arc<RwLock<Vec<WorkflowExecution>>>,
}

impl InMemoryExecutionHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ExecutionHistoryError {
    ExecutionHistoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ExecutionHistory for InMemoryExecutionHistory {
    async fn append(&self, execution: &WorkflowExecution) -> ExecutionHistoryResult<()> {
        let mut executions = self.executions.write().map_err(poisoned)?;
        executions.push(execution.clone());
        Ok(())
    }

    async fn recent(
        &self,
        workflow_id: WorkflowId,
        limit: usize,
    ) -> ExecutionHistoryResult<Vec<WorkflowExecution>> {
        let executions = self.executions.read().map_err(poisoned)?;
        let mut window: Vec<WorkflowExecution> = executions
            .iter()
            .rev()
            .filter(|execution| execution.workflow_id() == workflow_id)
            .take(limit)
            .cloned()
            .collect();
        window.reverse();
        Ok(window)
    }
}
