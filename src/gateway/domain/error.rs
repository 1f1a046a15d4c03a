//! Provider failures.

use crate::error::ErrorKind;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a provider adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The request never produced a response.
    #[error("provider transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response could not be interpreted.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Failure of a gateway capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider call exceeded the configured timeout.
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    /// A prompt template could not be rendered.
    #[error("prompt rendering failed: {0}")]
    Prompt(String),
}

impl GatewayError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(_) | Self::Timeout(_) => ErrorKind::Provider,
            Self::Prompt(_) => ErrorKind::Internal,
        }
    }
}
