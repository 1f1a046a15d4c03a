//! Unit tests for the generation module.
