//! Text generation request and normalised responses.

use crate::quality::QualityScore;
use serde::{Deserialize, Serialize};

/// One text generation call.
///
/// Unset sampling parameters fall back to the provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    /// User prompt.
    pub prompt: String,
    /// Token budget for the completion.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// System message framing the conversation.
    pub system_message: Option<String>,
}

impl TextRequest {
    /// Creates a request using configured defaults.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            system_message: None,
        }
    }

    /// Sets the token budget.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the system message.
    #[must_use]
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }
}

/// Normalised text generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponse {
    /// Generated text.
    pub text: String,
    /// Tokens consumed by the call.
    pub tokens_used: u32,
    /// Model that served the call.
    pub model_used: String,
}

/// Normalised translation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text, trimmed.
    pub translated_text: String,
    /// Tokens consumed by the call.
    pub tokens_used: u32,
    /// Model that served the call.
    pub model_used: String,
    /// Configured placeholder score; no metric is computed.
    pub quality_score: QualityScore,
}
