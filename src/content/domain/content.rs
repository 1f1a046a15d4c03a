//! Generated content entity.

use super::{ContentDomainError, ContentId, ParseContentTypeError};
use crate::language::Language;
use crate::quality::QualityScore;
use crate::task::domain::{Payload, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Short social media post.
    SocialPost,
    /// Long-form article.
    Article,
    /// Narrative story.
    Story,
    /// Letter addressed to a donor.
    DonorLetter,
    /// Newsletter edition.
    Newsletter,
    /// Prayer request text.
    PrayerRequest,
    /// Campaign marketing copy.
    CampaignCopy,
}

impl ContentType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SocialPost => "social_post",
            Self::Article => "article",
            Self::Story => "story",
            Self::DonorLetter => "donor_letter",
            Self::Newsletter => "newsletter",
            Self::PrayerRequest => "prayer_request",
            Self::CampaignCopy => "campaign_copy",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContentType {
    type Error = ParseContentTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "social_post" => Ok(Self::SocialPost),
            "article" => Ok(Self::Article),
            "story" => Ok(Self::Story),
            "donor_letter" => Ok(Self::DonorLetter),
            "newsletter" => Ok(Self::Newsletter),
            "prayer_request" => Ok(Self::PrayerRequest),
            "campaign_copy" => Ok(Self::CampaignCopy),
            _ => Err(ParseContentTypeError(value.to_owned())),
        }
    }
}

/// Publication marker; present only on published content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Time the content was published.
    pub published_at: DateTime<Utc>,
    /// Identifier assigned by the downstream publishing system.
    pub external_id: Option<String>,
}

/// Parameter object for creating generated content.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGeneratedContent {
    /// Owning task.
    pub task_id: TaskId,
    /// Kind of artifact.
    pub content_type: ContentType,
    /// Optional title.
    pub title: Option<String>,
    /// Generated body text.
    pub body: String,
    /// Content language.
    pub language: Language,
    /// Target platform, if any.
    pub platform: Option<String>,
    /// Free-form metadata.
    pub metadata: Payload,
    /// Optional quality score.
    pub quality_score: Option<QualityScore>,
}

/// Field-level update applied to generated content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub body: Option<String>,
    /// Replacement metadata.
    pub metadata: Option<Payload>,
    /// Replacement quality score.
    pub quality_score: Option<QualityScore>,
}

impl ContentPatch {
    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the replacement metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the replacement quality score.
    #[must_use]
    pub const fn with_quality_score(mut self, score: QualityScore) -> Self {
        self.quality_score = Some(score);
        self
    }
}

/// Generated artifact owned by a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    id: ContentId,
    task_id: TaskId,
    content_type: ContentType,
    title: Option<String>,
    body: String,
    language: Language,
    platform: Option<String>,
    metadata: Payload,
    quality_score: Option<QualityScore>,
    publication: Option<Publication>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted content.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedContentData {
    /// Persisted identifier.
    pub id: ContentId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted content type.
    pub content_type: ContentType,
    /// Persisted title.
    pub title: Option<String>,
    /// Persisted body.
    pub body: String,
    /// Persisted language.
    pub language: Language,
    /// Persisted platform.
    pub platform: Option<String>,
    /// Persisted metadata.
    pub metadata: Payload,
    /// Persisted quality score.
    pub quality_score: Option<QualityScore>,
    /// Persisted publication marker.
    pub publication: Option<Publication>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl GeneratedContent {
    /// Creates unpublished content with a trimmed body.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::EmptyBody`] when the body is blank.
    pub fn new(
        request: NewGeneratedContent,
        clock: &impl Clock,
    ) -> Result<Self, ContentDomainError> {
        let body = normalize_body(&request.body)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ContentId::new(),
            task_id: request.task_id,
            content_type: request.content_type,
            title: request.title,
            body,
            language: request.language,
            platform: request.platform,
            metadata: request.metadata,
            quality_score: request.quality_score,
            publication: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs content from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedContentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            content_type: data.content_type,
            title: data.title,
            body: data.body,
            language: data.language,
            platform: data.platform,
            metadata: data.metadata,
            quality_score: data.quality_score,
            publication: data.publication,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the content identifier.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the content type.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the content language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Returns the target platform, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns the metadata payload.
    #[must_use]
    pub const fn metadata(&self) -> &Payload {
        &self.metadata
    }

    /// Returns the quality score, if any.
    #[must_use]
    pub const fn quality_score(&self) -> Option<QualityScore> {
        self.quality_score
    }

    /// Returns the publication marker, if published.
    #[must_use]
    pub const fn publication(&self) -> Option<&Publication> {
        self.publication.as_ref()
    }

    /// Returns whether the content has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.publication.is_some()
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

    /// Applies an editorial update.
    ///
    /// # Errors
    ///
    /// Returns [`ContentDomainError::EmptyBody`] when the replacement body is
    /// blank; the content is left unchanged.
    pub fn apply(
        &mut self,
        patch: ContentPatch,
        clock: &impl Clock,
    ) -> Result<(), ContentDomainError> {
        let body = patch.body.as_deref().map(normalize_body).transpose()?;
        if let Some(text) = body {
            self.body = text;
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        if let Some(score) = patch.quality_score {
            self.quality_score = Some(score);
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Marks the content as published.
    pub fn publish(&mut self, external_id: Option<String>, clock: &impl Clock) {
        let published_at = clock.utc();
        self.publication = Some(Publication {
            published_at,
            external_id,
        });
        self.updated_at = published_at;
    }
}

fn normalize_body(body: &str) -> Result<String, ContentDomainError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ContentDomainError::EmptyBody);
    }
    Ok(trimmed.to_owned())
}
