//! Publishing requests and confirmations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One post handed to the downstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Target platform.
    pub platform: String,
    /// Post body.
    pub content: String,
    /// Media attached to the post.
    pub media_urls: Vec<String>,
    /// When the service should publish; immediately when unset.
    pub schedule_time: Option<DateTime<Utc>>,
}

impl PublishRequest {
    /// Creates an immediate post without media.
    #[must_use]
    pub fn new(platform: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            content: content.into(),
            media_urls: Vec::new(),
            schedule_time: None,
        }
    }
}

/// Caller choices applied when publishing stored content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishOptions {
    /// Platform override; defaults to the content's platform.
    pub platform: Option<String>,
    /// Media attached to the post.
    pub media_urls: Vec<String>,
    /// Scheduled publication time.
    pub schedule_time: Option<DateTime<Utc>>,
}

impl PublishOptions {
    /// Publishes to `platform` instead of the content's own platform.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Attaches media.
    #[must_use]
    pub fn with_media_urls(mut self, media_urls: Vec<String>) -> Self {
        self.media_urls = media_urls;
        self
    }

    /// Schedules the post.
    #[must_use]
    pub const fn with_schedule_time(mut self, schedule_time: DateTime<Utc>) -> Self {
        self.schedule_time = Some(schedule_time);
        self
    }
}

/// Downstream acknowledgement of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfirmation {
    /// Identifier assigned by the service, when it returns one.
    pub external_id: Option<String>,
    /// Raw response body.
    pub payload: Value,
}

impl PublishConfirmation {
    /// Builds a confirmation from a response body, reading the identifier
    /// from `id` or `post_id`.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        let external_id = ["id", "post_id"]
            .into_iter()
            .find_map(|key| payload.get(key))
            .and_then(|value| match value {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            });
        Self {
            external_id,
            payload,
        }
    }
}
