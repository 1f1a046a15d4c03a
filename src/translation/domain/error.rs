//! Errors for translation job validation.

use super::{TranslationJobId, TranslationStatus};
use thiserror::Error;

/// Errors returned by translation job operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationDomainError {
    /// Source text was empty after trimming.
    #[error("source text must not be empty")]
    EmptySourceText,

    /// The job status does not allow the requested transition.
    #[error("invalid translation job transition for {job_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Job identifier.
        job_id: TranslationJobId,
        /// Current status.
        from: TranslationStatus,
        /// Requested status.
        to: TranslationStatus,
    },
}

/// Error returned while parsing translation statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown translation status: {0}")]
pub struct ParseTranslationStatusError(pub String);
