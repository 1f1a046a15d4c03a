//! Port contracts for workflow storage and dispatch.

mod handler;
mod history;
mod repository;

#[cfg(test)]
pub use handler::MockWorkflowHandler;
pub use handler::{WorkflowHandler, WorkflowHandlerError, WorkflowInvocation};
pub use history::{ExecutionHistory, ExecutionHistoryError, ExecutionHistoryResult};
pub use repository::{WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult};
