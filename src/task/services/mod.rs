//! Application services for task lifecycle orchestration.

mod in_flight;
mod lifecycle;

pub use in_flight::InFlightCalls;
pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
