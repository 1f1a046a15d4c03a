//! Quality score attached to generated and translated text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Score in the closed range `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct QualityScore(f64);

/// Error returned for scores outside `0.0..=1.0` or not finite.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("quality score must be within 0..=1, got {0}")]
pub struct InvalidQualityScoreError(pub f64);

impl QualityScore {
    /// Placeholder score reported for translations until a real metric exists.
    pub const DEFAULT_TRANSLATION: Self = Self(0.85);

    /// Creates a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQualityScoreError`] when `value` is outside the
    /// unit interval.
    pub fn new(value: f64) -> Result<Self, InvalidQualityScoreError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidQualityScoreError(value))
        }
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for QualityScore {
    type Error = InvalidQualityScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualityScore> for f64 {
    fn from(score: QualityScore) -> Self {
        score.0
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
