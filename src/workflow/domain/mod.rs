//! Domain model for workflows and their executions.

mod error;
mod execution;
mod ids;
mod workflow;
mod workflow_type;

pub use error::WorkflowDomainError;
pub use execution::{ExecutionOutcome, WorkflowExecution};
pub use ids::{ExecutionId, WorkflowId};
pub use workflow::{NewWorkflow, Workflow, WorkflowPatch};
pub use workflow_type::WorkflowType;
