//! Workflow services: handler dispatch and the orchestrator.

mod handlers;
mod orchestrator;
mod registry;

pub use handlers::{AutoTranslateHandler, ScheduledPostHandler};
pub use orchestrator::{WorkflowOrchestrator, WorkflowServiceError, WorkflowServiceResult};
pub use registry::WorkflowHandlerRegistry;
