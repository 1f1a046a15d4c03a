//! Workflow definitions, triggering, and execution history.

use super::WorkflowHandlerRegistry;
use crate::actor::ActorId;
use crate::error::ErrorKind;
use crate::task::domain::Payload;
use crate::workflow::{
    domain::{
        ExecutionOutcome, NewWorkflow, Workflow, WorkflowDomainError, WorkflowExecution,
        WorkflowId, WorkflowPatch, WorkflowType,
    },
    ports::{
        ExecutionHistory, ExecutionHistoryError, WorkflowHandlerError, WorkflowInvocation,
        WorkflowRepository, WorkflowRepositoryError,
    },
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// Workflow validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// Workflow repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// Execution history operation failed.
    #[error(transparent)]
    History(#[from] ExecutionHistoryError),
    /// The referenced workflow does not exist.
    #[error("workflow not found: {0}")]
    NotFound(WorkflowId),
    /// The workflow exists but has been deactivated.
    #[error("workflow is inactive: {0}")]
    Inactive(WorkflowId),
    /// No handler is registered for the workflow type.
    #[error("no handler registered for workflow type '{0}'")]
    UnknownWorkflowType(WorkflowType),
    /// The handler failed.
    #[error(transparent)]
    Handler(#[from] WorkflowHandlerError),
}

impl WorkflowServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Inactive(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(WorkflowRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) | Self::History(_) | Self::UnknownWorkflowType(_) => {
                ErrorKind::Internal
            }
            Self::Handler(err) => err.kind(),
        }
    }
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Manages workflow definitions and runs them through registered handlers.
pub struct WorkflowOrchestrator<W, H, C>
where
    W: WorkflowRepository,
    H: ExecutionHistory,
    C: Clock + Send + Sync,
{
    workflows: Arc<W>,
    history: Arc<H>,
    handlers: WorkflowHandlerRegistry,
    clock: Arc<C>,
}

impl<W, H, C> WorkflowOrchestrator<W, H, C>
where
    W: WorkflowRepository,
    H: ExecutionHistory,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator over `handlers`.
    #[must_use]
    pub const fn new(
        workflows: Arc<W>,
        history: Arc<H>,
        handlers: WorkflowHandlerRegistry,
        clock: Arc<C>,
    ) -> Self {
        Self {
            workflows,
            history,
            handlers,
            clock,
        }
    }

    /// Creates an active workflow.
    ///
    /// The workflow type need not have a handler yet; dispatch is checked
    /// when the workflow is triggered.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Domain`] for an invalid name.
    pub async fn create(&self, request: NewWorkflow) -> WorkflowServiceResult<Workflow> {
        let workflow = Workflow::new(request, &*self.clock)?;
        self.workflows.store(&workflow).await?;
        tracing::info!(
            workflow_id = %workflow.id(),
            workflow_type = %workflow.workflow_type(),
            created_by = %workflow.created_by(),
            "workflow created"
        );
        Ok(workflow)
    }

    /// Retrieves a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] for unknown workflows.
    pub async fn get(&self, id: WorkflowId) -> WorkflowServiceResult<Workflow> {
        self.workflows
            .find_by_id(id)
            .await?
            .ok_or(WorkflowServiceError::NotFound(id))
    }

    /// Lists workflows, newest first, optionally for one creator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, created_by: Option<&ActorId>) -> WorkflowServiceResult<Vec<Workflow>> {
        Ok(self.workflows.list(created_by).await?)
    }

    /// Applies a field-level update.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] for unknown workflows and
    /// [`WorkflowServiceError::Domain`] for an invalid replacement name.
    pub async fn update(
        &self,
        id: WorkflowId,
        patch: WorkflowPatch,
    ) -> WorkflowServiceResult<Workflow> {
        let mut workflow = self.get(id).await?;
        workflow.apply(patch, &*self.clock)?;
        self.workflows.update(&workflow).await?;
        tracing::info!(workflow_id = %id, is_active = workflow.is_active(), "workflow updated");
        Ok(workflow)
    }

    /// Deletes a workflow; its execution history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when nothing was deleted.
    pub async fn delete(&self, id: WorkflowId) -> WorkflowServiceResult<()> {
        if !self.workflows.delete(id).await? {
            return Err(WorkflowServiceError::NotFound(id));
        }
        tracing::info!(workflow_id = %id, "workflow deleted");
        Ok(())
    }

    /// Runs a workflow and records the execution.
    ///
    /// Once dispatch starts, one execution is appended whatever the
    /// outcome; a handler failure is returned to the caller after it has
    /// been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] or
    /// [`WorkflowServiceError::Inactive`] before dispatch (nothing is
    /// recorded), [`WorkflowServiceError::UnknownWorkflowType`] or
    /// [`WorkflowServiceError::Handler`] after recording a failed
    /// execution, and [`WorkflowServiceError::History`] when a successful
    /// execution cannot be recorded.
    pub async fn trigger(
        &self,
        id: WorkflowId,
        trigger_data: Payload,
        triggered_by: ActorId,
    ) -> WorkflowServiceResult<WorkflowExecution> {
        let workflow = self.get(id).await?;
        if !workflow.is_active() {
            return Err(WorkflowServiceError::Inactive(id));
        }

        let started_at = self.clock.utc();
        let invocation = WorkflowInvocation {
            workflow,
            trigger_data,
            triggered_by,
        };
        let outcome = self.dispatch(&invocation).await;
        let completed_at = self.clock.utc();

        let WorkflowInvocation {
            workflow,
            trigger_data,
            triggered_by,
        } = invocation;
        let recorded_outcome = match &outcome {
            Ok(result) => ExecutionOutcome::Completed {
                result: result.clone(),
            },
            Err(err) => ExecutionOutcome::Failed {
                error: err.to_string(),
            },
        };
        let execution = WorkflowExecution::new(
            workflow.id(),
            trigger_data,
            triggered_by,
            started_at,
            completed_at,
            recorded_outcome,
        );
        let appended = self.history.append(&execution).await;

        match (outcome, appended) {
            (Ok(_), Ok(())) => {
                tracing::info!(
                    workflow_id = %id,
                    execution_id = %execution.id(),
                    workflow_type = %workflow.workflow_type(),
                    "workflow executed"
                );
                Ok(execution)
            }
            (Ok(_), Err(history_err)) => {
                tracing::error!(
                    workflow_id = %id,
                    error = %history_err,
                    "workflow execution not recorded"
                );
                Err(history_err.into())
            }
            (Err(err), recorded) => {
                if let Err(history_err) = recorded {
                    tracing::error!(
                        workflow_id = %id,
                        error = %history_err,
                        "workflow execution not recorded"
                    );
                }
                tracing::error!(
                    workflow_id = %id,
                    execution_id = %execution.id(),
                    workflow_type = %workflow.workflow_type(),
                    error = %err,
                    "workflow execution failed"
                );
                Err(err)
            }
        }
    }

    /// Returns the last `limit` executions of a workflow, oldest first.
    ///
    /// Unknown and deleted workflows yield whatever was recorded for them,
    /// which is nothing for an id that was never triggered.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::History`] when the log cannot be read.
    pub async fn history(
        &self,
        id: WorkflowId,
        limit: usize,
    ) -> WorkflowServiceResult<Vec<WorkflowExecution>> {
        Ok(self.history.recent(id, limit).await?)
    }

    /// Returns the workflow types that can be triggered.
    #[must_use]
    pub fn workflow_types(&self) -> Vec<WorkflowType> {
        self.handlers.workflow_types()
    }

    async fn dispatch(&self, invocation: &WorkflowInvocation) -> WorkflowServiceResult<Value> {
        let workflow_type = invocation.workflow.workflow_type();
        let handler = self
            .handlers
            .get(workflow_type)
            .ok_or_else(|| WorkflowServiceError::UnknownWorkflowType(workflow_type.clone()))?;
        Ok(handler.execute(invocation).await?)
    }
}
