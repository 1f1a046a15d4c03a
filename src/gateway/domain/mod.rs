//! Provider request, response, and error types.

mod enhancement;
mod error;
mod image;
mod text;

pub use enhancement::{Enhancement, EnhancementKind, UnsupportedEnhancementError};
pub use error::{GatewayError, ProviderError};
pub use image::{GeneratedImage, ImageSize, UnsupportedImageSizeError};
pub use text::{TextRequest, TextResponse, Translation};
