//! Translation job entity and its status machine.

use super::{ParseTranslationStatusError, TranslationDomainError, TranslationJobId};
use crate::language::Language;
use crate::quality::QualityScore;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a translation job, tracked separately from its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Job created, provider not yet called.
    Pending,
    /// Provider call in flight.
    Processing,
    /// Translated text recorded.
    Completed,
    /// Provider call failed.
    Failed,
}

impl TranslationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Processing) | (Self::Processing, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TranslationStatus {
    type Error = ParseTranslationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseTranslationStatusError(value.to_owned())),
        }
    }
}

/// Parameter object for creating a translation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslationJob {
    /// Owning task.
    pub task_id: TaskId,
    /// Language of `source_text`.
    pub source_language: Language,
    /// Requested output language.
    pub target_language: Language,
    /// Text to translate.
    pub source_text: String,
}

/// One translation unit owned by a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationJob {
    id: TranslationJobId,
    task_id: TaskId,
    source_language: Language,
    target_language: Language,
    source_text: String,
    translated_text: Option<String>,
    status: TranslationStatus,
    quality_score: Option<QualityScore>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted translation job.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTranslationJobData {
    /// Persisted identifier.
    pub id: TranslationJobId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted source language.
    pub source_language: Language,
    /// Persisted target language.
    pub target_language: Language,
    /// Persisted source text.
    pub source_text: String,
    /// Persisted translated text.
    pub translated_text: Option<String>,
    /// Persisted status.
    pub status: TranslationStatus,
    /// Persisted quality score.
    pub quality_score: Option<QualityScore>,
    /// Persisted error message.
    pub error_message: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TranslationJob {
    /// Creates a pending job.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::EmptySourceText`] when the source
    /// text is blank.
    pub fn new(
        request: NewTranslationJob,
        clock: &impl Clock,
    ) -> Result<Self, TranslationDomainError> {
        if request.source_text.trim().is_empty() {
            return Err(TranslationDomainError::EmptySourceText);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TranslationJobId::new(),
            task_id: request.task_id,
            source_language: request.source_language,
            target_language: request.target_language,
            source_text: request.source_text,
            translated_text: None,
            status: TranslationStatus::Pending,
            quality_score: None,
            error_message: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTranslationJobData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            source_language: data.source_language,
            target_language: data.target_language,
            source_text: data.source_text,
            translated_text: data.translated_text,
            status: data.status,
            quality_score: data.quality_score,
            error_message: data.error_message,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> TranslationJobId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the source language.
    #[must_use]
    pub const fn source_language(&self) -> Language {
        self.source_language
    }

    /// Returns the target language.
    #[must_use]
    pub const fn target_language(&self) -> Language {
        self.target_language
    }

    /// Returns the source text.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Returns the translated text, present only once completed.
    #[must_use]
    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    /// Returns the job status.
    #[must_use]
    pub const fn status(&self) -> TranslationStatus {
        self.status
    }

    /// Returns the quality score, if recorded.
    #[must_use]
    pub const fn quality_score(&self) -> Option<QualityScore> {
        self.quality_score
    }

    /// Returns the failure message, if failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the job from `pending` to `processing`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::InvalidStateTransition`] when the
    /// job is not pending.
    pub fn begin(&mut self, clock: &impl Clock) -> Result<(), TranslationDomainError> {
        self.transition_to(TranslationStatus::Processing, clock)
    }

    /// Records the translated text and moves the job to `completed`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::InvalidStateTransition`] when the
    /// job is not processing.
    pub fn complete(
        &mut self,
        translated_text: String,
        quality_score: QualityScore,
        clock: &impl Clock,
    ) -> Result<(), TranslationDomainError> {
        self.transition_to(TranslationStatus::Completed, clock)?;
        self.translated_text = Some(translated_text);
        self.quality_score = Some(quality_score);
        Ok(())
    }

    /// Records a failure and moves the job to `failed`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::InvalidStateTransition`] when the
    /// job is not processing.
    pub fn fail(
        &mut self,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TranslationDomainError> {
        self.transition_to(TranslationStatus::Failed, clock)?;
        self.error_message = Some(message.into());
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: TranslationStatus,
        clock: &impl Clock,
    ) -> Result<(), TranslationDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TranslationDomainError::InvalidStateTransition {
                job_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
