//! Port for the downstream social media service.

use crate::error::ErrorKind;
use crate::publishing::domain::{PublishConfirmation, PublishRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a publish call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// The request never produced a response.
    #[error("publishing transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("publishing service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// The response could not be interpreted.
    #[error("invalid publishing response: {0}")]
    InvalidResponse(String),
}

impl PublishError {
    /// Classifies the error for callers; every publish failure is
    /// retryable.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Provider
    }
}

/// Hands posts to a downstream publishing service.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes or schedules one post.
    async fn publish(&self, request: &PublishRequest) -> Result<PublishConfirmation, PublishError>;
}
