//! Errors for template validation and rendering.

use thiserror::Error;

/// Errors returned by template construction, updates, and rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// Template name was empty after trimming.
    #[error("template name must not be empty")]
    EmptyName,

    /// Template name exceeds the stored column width.
    #[error("template name must be at most {max} characters, got {actual}")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Prompt template was empty after trimming.
    #[error("prompt template must not be empty")]
    EmptyPromptTemplate,

    /// A placeholder had no supplied value.
    #[error("missing variable: {0}")]
    MissingVariable(String),
}
