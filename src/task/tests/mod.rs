//! Unit tests for the task module.
//!
//! Covers the status state machine, the aggregate's output and error
//! invariants, and the lifecycle service over the in-memory store.
