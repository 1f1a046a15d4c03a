//! Text generation capability.

use crate::gateway::domain::{ProviderError, TextRequest, TextResponse};
use async_trait::async_trait;

/// Provider capability that turns a prompt into text.
///
/// Implementations perform exactly one provider call per invocation and
/// never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `request`.
    async fn generate(&self, request: &TextRequest) -> Result<TextResponse, ProviderError>;
}
