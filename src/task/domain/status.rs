//! Task status state machine and task type classification.

use super::{ParseTaskStatusError, ParseTaskTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but the provider has not been called.
    Pending,
    /// The provider call is in flight.
    Processing,
    /// The provider call succeeded and its output was committed.
    Completed,
    /// The provider call or the result commit failed.
    Failed,
    /// The task was rejected before reaching a terminal state.
    Cancelled,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether no further transition may leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Processing | Self::Cancelled)
                | (
                    Self::Processing,
                    Self::Completed | Self::Failed | Self::Cancelled
                )
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Kind of AI operation a task wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Text or social content generation.
    Generation,
    /// Text translation between supported languages.
    Translation,
    /// Image generation.
    ImageGeneration,
    /// Editing an existing text.
    Enhancement,
    /// Work initiated by a workflow rather than a direct caller.
    Automation,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Translation => "translation",
            Self::ImageGeneration => "image_generation",
            Self::Enhancement => "enhancement",
            Self::Automation => "automation",
        }
    }

    /// Returns whether tasks of this type require approval by default.
    ///
    /// Generated text and images are externally publishable; translations
    /// and enhancements are intermediate edits.
    #[must_use]
    pub const fn requires_approval_by_default(self) -> bool {
        matches!(self, Self::Generation | Self::ImageGeneration)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "generation" => Ok(Self::Generation),
            "translation" => Ok(Self::Translation),
            "image_generation" => Ok(Self::ImageGeneration),
            "enhancement" => Ok(Self::Enhancement),
            "automation" => Ok(Self::Automation),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}
