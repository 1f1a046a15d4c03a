//! Unit tests for the translation module.

mod domain_tests;
