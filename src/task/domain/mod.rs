//! Domain model for task lifecycle management.
//!
//! The task domain models AI operation invocations, their status state
//! machine, approval trail, and the result entities committed alongside a
//! completed task, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod artifact;
mod error;
mod ids;
mod status;
mod task;

pub use artifact::TaskArtifact;
pub use error::{ParseTaskStatusError, ParseTaskTypeError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskStatus, TaskType};
pub use task::{
    Approval, FailOutcome, NewTask, Payload, PersistedTaskData, Task, TaskCompletion,
};
