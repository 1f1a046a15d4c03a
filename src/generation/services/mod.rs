//! Generation services.

mod content;
mod image;

pub use content::ContentGenerationService;
pub use image::ImageGenerationService;
