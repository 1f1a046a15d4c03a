//! HTTP adapter for the social media service.

use crate::config::PublishingConfig;
use crate::publishing::{
    domain::{PublishConfirmation, PublishRequest},
    ports::{PublishError, Publisher},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const POSTS_PATH: &str = "/api/v1/posts";

/// Publisher posting JSON to the configured social media service.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    client: Client,
    config: PublishingConfig,
}

impl HttpPublisher {
    /// Builds a publisher whose HTTP client enforces the configured
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Transport`] when the client cannot be built.
    pub fn new(config: PublishingConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{POSTS_PATH}",
            self.config.social_media_service_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishConfirmation, PublishError> {
        let mut builder = self.client.post(self.endpoint()).json(request);
        if let Some(token) = &self.config.auth_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await.map_err(|err| {
            tracing::error!(error = %err, platform = %request.platform, "publish request failed");
            PublishError::Transport(err.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                platform = %request.platform,
                "publishing service returned an error status"
            );
            return Err(PublishError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|err| PublishError::InvalidResponse(err.to_string()))?;
        Ok(PublishConfirmation::from_payload(payload))
    }
}
