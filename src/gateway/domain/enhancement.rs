//! Enhancement kinds and results.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Editing operation applied to existing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementKind {
    /// Grammar, spelling, and punctuation fixes.
    Grammar,
    /// Tone adjustment.
    Tone,
    /// Search optimisation.
    Seo,
    /// Summary.
    Summarize,
    /// General improvement.
    Improve,
}

/// Error returned for enhancement kinds outside the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported enhancement type: {0}")]
pub struct UnsupportedEnhancementError(pub String);

impl EnhancementKind {
    /// Every supported kind.
    pub const ALL: [Self; 5] = [
        Self::Grammar,
        Self::Tone,
        Self::Seo,
        Self::Summarize,
        Self::Improve,
    ];

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Tone => "tone",
            Self::Seo => "seo",
            Self::Summarize => "summarize",
            Self::Improve => "improve",
        }
    }
}

impl fmt::Display for EnhancementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EnhancementKind {
    type Error = UnsupportedEnhancementError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim().to_ascii_lowercase())
            .ok_or_else(|| UnsupportedEnhancementError(value.to_owned()))
    }
}

/// Normalised enhancement result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enhancement {
    /// Edited text, trimmed.
    pub enhanced_text: String,
    /// Tokens consumed by the call.
    pub tokens_used: u32,
    /// Model that served the call.
    pub model_used: String,
    /// Coarse description of the edits.
    pub changes_made: Vec<String>,
}
