//! Translation between the supported content languages.
//!
//! A translation runs as a task whose completion commit also stores the
//! [`domain::TranslationJob`] it produced. Batch and content-level variants
//! aggregate per-item outcomes so one failed language never hides the
//! others.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
