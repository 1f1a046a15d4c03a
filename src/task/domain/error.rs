//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status transition is not allowed by the state machine.
    #[error("invalid task state transition for {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },

    /// A failure or rejection message was empty after trimming.
    #[error("task error message must not be empty")]
    EmptyErrorMessage,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task types from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);
