//! Resolved caller identity recorded on audited entities.
//!
//! Authentication happens outside this crate; services only record the
//! identity they are handed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque identifier of the actor initiating, approving, or rejecting work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

/// Error returned when an actor identifier is blank.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("actor identifier must not be empty")]
pub struct EmptyActorIdError;

impl ActorId {
    /// Creates a validated actor identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyActorIdError`] when the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyActorIdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyActorIdError);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ActorId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
