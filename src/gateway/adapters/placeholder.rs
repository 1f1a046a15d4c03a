//! Placeholder image strategy used until a real backend is wired in.

use crate::gateway::{
    domain::{GeneratedImage, ImageSize, ProviderError},
    ports::ImageGenerator,
};
use async_trait::async_trait;

/// Image returned by [`PlaceholderImageGenerator`].
pub const PLACEHOLDER_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/6/65/No-Image-Placeholder.svg/975px-No-Image-Placeholder.svg.png";

/// Image generator that always returns a fixed placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImageGenerator;

#[async_trait]
impl ImageGenerator for PlaceholderImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<GeneratedImage, ProviderError> {
        tracing::warn!(
            prompt_len = prompt.len(),
            %size,
            "image generation backend is a placeholder"
        );
        Ok(GeneratedImage {
            image_url: PLACEHOLDER_IMAGE_URL.to_owned(),
            size,
            format: "jpg".to_owned(),
            model_used: "placeholder".to_owned(),
        })
    }
}
