//! Generated content produced by completed generation tasks.
//!
//! Content records are created only through the task store's completion
//! commit, so every record has an owning completed task. This module owns
//! the post-creation surface: reads, editorial updates, publication
//! marking, and aggregate statistics.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
