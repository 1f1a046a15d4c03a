//! Unit tests for the shared operation protocol.

mod runner_tests;
