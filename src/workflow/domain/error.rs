//! Errors for workflow validation.

use thiserror::Error;

/// Errors returned by workflow construction and updates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// Workflow name was empty after trimming.
    #[error("workflow name must not be empty")]
    EmptyName,

    /// Workflow name exceeds the accepted length.
    #[error("workflow name must be at most {max} characters, got {actual}")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Workflow type was empty after trimming.
    #[error("workflow type must not be empty")]
    EmptyWorkflowType,

    /// Workflow type contains characters outside `[a-z0-9_]`.
    #[error("invalid workflow type '{0}': only lowercase letters, digits, and underscores are allowed")]
    InvalidWorkflowType(String),
}
