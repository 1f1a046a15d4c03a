//! In-memory publisher that records every request.

use crate::publishing::{
    domain::{PublishConfirmation, PublishRequest},
    ports::{PublishError, Publisher},
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Publisher that keeps requests in memory and confirms them with
/// sequential identifiers, or fails every call when configured to.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<PublishRequest>>>,
    failure: Option<PublishError>,
}

impl RecordingPublisher {
    /// Creates a publisher that accepts every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher that rejects every request with `error`.
    #[must_use]
    pub fn failing(error: PublishError) -> Self {
        Self {
            published: Arc::default(),
            failure: Some(error),
        }
    }

    /// Returns the accepted requests, oldest first.
    #[must_use]
    pub fn published(&self) -> Vec<PublishRequest> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishConfirmation, PublishError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut published = self
            .published
            .lock()
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        published.push(request.clone());
        let external_id = format!("recorded-{}", published.len());
        Ok(PublishConfirmation::from_payload(json!({
            "id": external_id,
            "platform": request.platform,
            "scheduled": request.schedule_time.is_some(),
        })))
    }
}
