//! Capability-typed gateway over the provider ports.

use super::prompts::{enhancement_request, translation_request};
use crate::gateway::{
    domain::{
        Enhancement, EnhancementKind, GatewayError, GeneratedImage, ImageSize, ProviderError,
        TextRequest, TextResponse, Translation,
    },
    ports::{ImageGenerator, TextGenerator},
};
use crate::language::Language;
use crate::quality::QualityScore;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Result type for gateway capabilities.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// AI provider gateway.
///
/// Every provider call is bounded by the configured timeout. Calls are
/// never retried.
pub struct AiGateway<T, I>
where
    T: TextGenerator,
    I: ImageGenerator,
{
    text: Arc<T>,
    images: Arc<I>,
    timeout: Duration,
    quality_score: QualityScore,
}

impl<T, I> AiGateway<T, I>
where
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Creates a gateway reporting the default translation score.
    #[must_use]
    pub const fn new(text: Arc<T>, images: Arc<I>, timeout: Duration) -> Self {
        Self {
            text,
            images,
            timeout,
            quality_score: QualityScore::DEFAULT_TRANSLATION,
        }
    }

    /// Replaces the score recorded on translations.
    #[must_use]
    pub const fn with_quality_score(mut self, quality_score: QualityScore) -> Self {
        self.quality_score = quality_score;
        self
    }

    /// Returns the provider call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Generates text for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Provider`] when the provider fails and
    /// [`GatewayError::Timeout`] when it does not answer in time.
    pub async fn generate_text(&self, request: &TextRequest) -> GatewayResult<TextResponse> {
        self.bounded(self.text.generate(request)).await
    }

    /// Translates `text` between two supported languages.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_text`].
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> GatewayResult<Translation> {
        let request = translation_request(text, source, target)?;
        let response = self.generate_text(&request).await?;
        Ok(Translation {
            translated_text: response.text.trim().to_owned(),
            tokens_used: response.tokens_used,
            model_used: response.model_used,
            quality_score: self.quality_score,
        })
    }

    /// Applies an editing operation to `text`.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_text`].
    pub async fn enhance(
        &self,
        text: &str,
        kind: EnhancementKind,
        context: Option<&str>,
    ) -> GatewayResult<Enhancement> {
        let request = enhancement_request(text, kind, context)?;
        let response = self.generate_text(&request).await?;
        Ok(Enhancement {
            enhanced_text: response.text.trim().to_owned(),
            tokens_used: response.tokens_used,
            model_used: response.model_used,
            changes_made: vec!["Enhanced".to_owned()],
        })
    }

    /// Generates an image through the configured strategy.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_text`].
    pub async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> GatewayResult<GeneratedImage> {
        self.bounded(self.images.generate(prompt, size)).await
    }

    /// Generates text for every prompt concurrently.
    ///
    /// Results keep the order of `prompts`; one failure never affects its
    /// siblings.
    pub async fn batch(
        &self,
        prompts: &[String],
        max_tokens: u32,
        temperature: f32,
    ) -> Vec<GatewayResult<TextResponse>> {
        let requests: Vec<TextRequest> = prompts
            .iter()
            .map(|prompt| {
                TextRequest::new(prompt.as_str())
                    .with_max_tokens(max_tokens)
                    .with_temperature(temperature)
            })
            .collect();
        join_all(requests.iter().map(|request| self.generate_text(request))).await
    }

    async fn bounded<R, F>(&self, call: F) -> GatewayResult<R>
    where
        F: Future<Output = Result<R, ProviderError>> + Send,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::error!(error = %err, "provider call failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::error!(timeout = ?self.timeout, "provider call timed out");
                Err(GatewayError::Timeout(self.timeout))
            }
        }
    }
}
