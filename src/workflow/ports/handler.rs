//! Port implemented by workflow type handlers.

use crate::actor::ActorId;
use crate::error::ErrorKind;
use crate::operation::OperationError;
use crate::publishing::services::PublishingServiceError;
use crate::task::domain::Payload;
use crate::workflow::domain::Workflow;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Everything a handler sees about one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInvocation {
    /// Triggered workflow, including its configuration.
    pub workflow: Workflow,
    /// Data supplied with the trigger.
    pub trigger_data: Payload,
    /// Triggering actor, recorded on every task the handler creates.
    pub triggered_by: ActorId,
}

/// Failure of a workflow handler.
#[derive(Debug, Error)]
pub enum WorkflowHandlerError {
    /// The workflow configuration is unusable.
    #[error("invalid workflow configuration: {0}")]
    InvalidConfig(String),
    /// The trigger data is missing or malformed.
    #[error("invalid trigger data: {0}")]
    InvalidTrigger(String),
    /// A delegated domain operation failed.
    #[error(transparent)]
    Operation(#[from] OperationError),
    /// Publishing the generated content failed.
    #[error(transparent)]
    Publishing(#[from] PublishingServiceError),
    /// The handler result could not be encoded.
    #[error("workflow result could not be encoded: {0}")]
    Encoding(String),
}

impl WorkflowHandlerError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig(_) | Self::InvalidTrigger(_) => ErrorKind::Validation,
            Self::Operation(err) => err.kind(),
            Self::Publishing(err) => err.kind(),
            Self::Encoding(_) => ErrorKind::Internal,
        }
    }
}

/// Executes one workflow type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowHandler: Send + Sync {
    /// Runs the workflow and returns its result document.
    async fn execute(&self, invocation: &WorkflowInvocation) -> Result<Value, WorkflowHandlerError>;
}
