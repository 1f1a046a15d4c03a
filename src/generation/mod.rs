//! Content and image generation.
//!
//! Generation builds a provider prompt from a typed [`domain::ContentBrief`]
//! or from a stored template, runs it as an approval-gated task, and
//! commits the resulting generated content with the completed task.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
