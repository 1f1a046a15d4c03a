//! Validated workflow type name.

use super::WorkflowDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handler key of a workflow, such as `auto_translate`.
///
/// The set of types is open: any lowercase `[a-z0-9_]` name is accepted,
/// and dispatch fails only when no handler is registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkflowType(String);

impl WorkflowType {
    /// Type name of the built-in auto-translation workflow.
    pub const AUTO_TRANSLATE: &'static str = "auto_translate";

    /// Type name of the built-in scheduled post workflow.
    pub const SCHEDULED_POST: &'static str = "scheduled_post";

    /// Creates a validated workflow type; input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyWorkflowType`] for blank input and
    /// [`WorkflowDomainError::InvalidWorkflowType`] for characters outside
    /// `[a-z0-9_]`.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkflowDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(WorkflowDomainError::EmptyWorkflowType);
        }
        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !is_valid {
            return Err(WorkflowDomainError::InvalidWorkflowType(raw));
        }
        Ok(Self(normalized))
    }

    /// The built-in auto-translation type.
    #[must_use]
    pub fn auto_translate() -> Self {
        Self(Self::AUTO_TRANSLATE.to_owned())
    }

    /// The built-in scheduled post type.
    #[must_use]
    pub fn scheduled_post() -> Self {
        Self(Self::SCHEDULED_POST.to_owned())
    }

    /// Returns the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkflowType {
    type Error = WorkflowDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkflowType> for String {
    fn from(value: WorkflowType) -> Self {
        value.0
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
