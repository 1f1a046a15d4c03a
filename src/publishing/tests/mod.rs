//! Unit tests for the publishing module.
