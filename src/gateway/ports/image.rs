//! Image generation strategy.

use crate::gateway::domain::{GeneratedImage, ImageSize, ProviderError};
use async_trait::async_trait;

/// Pluggable image generation backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates an image for `prompt` at `size`.
    async fn generate(&self, prompt: &str, size: ImageSize)
    -> Result<GeneratedImage, ProviderError>;
}
