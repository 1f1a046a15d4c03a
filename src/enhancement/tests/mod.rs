//! Unit tests for the enhancement module.

mod service_tests;
