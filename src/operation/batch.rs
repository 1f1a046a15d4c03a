//! Per-item results of batch operations.

use super::{OperationError, OperationResult};
use crate::error::ErrorKind;
use serde::Serialize;

/// Outcome of one batch item; a failed item never aborts its siblings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchItemResult<I, V> {
    /// The item succeeded.
    Success(V),
    /// The item failed.
    Failure {
        /// Error message.
        error: String,
        /// Classification of the error.
        kind: ErrorKind,
        /// Input that produced the failure.
        original_input: I,
    },
}

impl<I, V> BatchItemResult<I, V> {
    /// Captures an item result, keeping the input on failure.
    #[must_use]
    pub fn capture(result: OperationResult<V>, original_input: I) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::failed(&err, original_input),
        }
    }

    /// Builds the failure entry for `err`.
    #[must_use]
    pub fn failed(err: &OperationError, original_input: I) -> Self {
        tracing::warn!(error = %err, kind = %err.kind(), "batch item failed");
        Self::Failure {
            error: err.to_string(),
            kind: err.kind(),
            original_input,
        }
    }

    /// Returns whether the item succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&V> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error message, if the item failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
