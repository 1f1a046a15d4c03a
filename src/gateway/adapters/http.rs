//! HTTP adapter for the configured chat deployment.

use crate::config::ProviderConfig;
use crate::gateway::{
    domain::{ProviderError, TextRequest, TextResponse},
    ports::TextGenerator,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const CHAT_PATH: &str = "/api/v0/chatLLM";
const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful AI assistant.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    deployment_token: &'a str,
    deployment_id: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    usage: ChatUsage,
    model: Option<String>,
}

/// Text generator backed by one provider deployment reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: Client,
    config: ProviderConfig,
}

impl HttpTextGenerator {
    /// Builds a generator whose HTTP client enforces the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] when the client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}{CHAT_PATH}", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, request: &TextRequest) -> Result<TextResponse, ProviderError> {
        let system = request
            .system_message
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE);
        let body = ChatRequest {
            deployment_token: &self.config.deployment_token,
            deployment_id: &self.config.deployment_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature.unwrap_or(self.config.temperature),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "provider request failed");
                ProviderError::Transport(err.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "provider returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;
        Ok(TextResponse {
            text: parsed.content,
            tokens_used: parsed.usage.total_tokens,
            model_used: parsed
                .model
                .unwrap_or_else(|| self.config.default_model.clone()),
        })
    }
}
