//! Unit tests for the content module.
//!
//! Content can only be created alongside a completed task, so fixtures
//! drive a task through the lifecycle service before exercising the
//! content service against the same in-memory store.
