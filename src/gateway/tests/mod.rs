//! Unit tests for the AI provider gateway.

mod gateway_tests;
