//! Unit tests for the template module.
//!
//! Covers placeholder extraction and strict rendering, the derived
//! variable invariant, and the template service over the in-memory
//! repository.
