//! Record of one workflow trigger.

use super::{ExecutionId, WorkflowId};
use crate::actor::ActorId;
use crate::task::domain::Payload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a workflow execution ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The handler returned a result.
    Completed {
        /// Handler result.
        result: Value,
    },
    /// The handler or its dispatch failed.
    Failed {
        /// Failure message.
        error: String,
    },
}

/// One append-only execution history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    id: ExecutionId,
    workflow_id: WorkflowId,
    trigger_data: Payload,
    triggered_by: ActorId,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    outcome: ExecutionOutcome,
}

impl WorkflowExecution {
    /// Records a finished execution.
    #[must_use]
    pub fn new(
        workflow_id: WorkflowId,
        trigger_data: Payload,
        triggered_by: ActorId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        outcome: ExecutionOutcome,
    ) -> Self {
        Self {
            id: ExecutionId::new(),
            workflow_id,
            trigger_data,
            triggered_by,
            started_at,
            completed_at,
            outcome,
        }
    }

    /// Returns the execution identifier.
    #[must_use]
    pub const fn id(&self) -> ExecutionId {
        self.id
    }

    /// Returns the executed workflow.
    #[must_use]
    pub const fn workflow_id(&self) -> WorkflowId {
        self.workflow_id
    }

    /// Returns the data supplied with the trigger.
    #[must_use]
    pub const fn trigger_data(&self) -> &Payload {
        &self.trigger_data
    }

    /// Returns the triggering actor.
    #[must_use]
    pub const fn triggered_by(&self) -> &ActorId {
        &self.triggered_by
    }

    /// Returns when the handler was started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the handler finished.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &ExecutionOutcome {
        &self.outcome
    }

    /// Returns the handler result of a completed execution.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            ExecutionOutcome::Completed { result } => Some(result),
            ExecutionOutcome::Failed { .. } => None,
        }
    }

    /// Returns the failure message of a failed execution.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ExecutionOutcome::Completed { .. } => None,
            ExecutionOutcome::Failed { error } => Some(error),
        }
    }
}
