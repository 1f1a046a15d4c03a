//! Named automations that run domain operations on demand.
//!
//! A [`domain::Workflow`] pairs a [`domain::WorkflowType`] with a JSON
//! configuration. Triggering a workflow dispatches to the handler
//! registered for its type and appends one [`domain::WorkflowExecution`]
//! to the execution history whatever the outcome.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
