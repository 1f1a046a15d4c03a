//! Crate-wide failure classification.
//!
//! Each service error maps onto one [`ErrorKind`] so callers at the
//! boundary can tell retryable provider failures apart from rejected input
//! without matching on every nested variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boundary-visible classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-supplied input violated a precondition.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// An internal invariant or infrastructure failure.
    Internal,
    /// The AI provider or a downstream collaborator failed.
    Provider,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Provider => "provider",
        }
    }

    /// Returns whether a caller may retry the failed call with backoff.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Provider)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
