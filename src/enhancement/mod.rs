//! Editing operations on existing text.
//!
//! Enhancements run as tasks that do not require approval by default and
//! commit no result entity; the edited text is recorded in the task output.

pub mod services;

#[cfg(test)]
mod tests;
