//! Provider capability ports.

mod image;
mod text;

pub use image::ImageGenerator;
#[cfg(test)]
pub use text::MockTextGenerator;
pub use text::TextGenerator;
