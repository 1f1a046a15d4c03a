//! Shared protocol for AI operations wrapped in tasks.
//!
//! Every domain operation validates its input, creates a `pending` task,
//! moves it to `processing`, calls the gateway, and then either commits the
//! completed task together with its result entities or records the
//! failure. [`OperationRunner`] owns that sequence, including cooperative
//! cancellation of the provider call when a reviewer rejects the task.

mod batch;
mod error;
mod runner;

pub use batch::BatchItemResult;
pub use error::{OperationError, OperationResult};
pub use runner::{CompletedOperation, OperationOutcome, OperationRunner};

pub(crate) use runner::payload;

#[cfg(test)]
mod tests;
