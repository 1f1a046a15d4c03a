//! Errors for generated content validation.

use thiserror::Error;

/// Errors returned by generated content construction and updates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentDomainError {
    /// Content body was empty after trimming.
    #[error("generated content body must not be empty")]
    EmptyBody,
}

/// Error returned while parsing content types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown content type: {0}")]
pub struct ParseContentTypeError(pub String);
