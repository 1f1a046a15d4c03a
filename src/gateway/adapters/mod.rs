//! Provider adapter implementations.

mod http;
mod placeholder;
mod scripted;

pub use http::HttpTextGenerator;
pub use placeholder::{PLACEHOLDER_IMAGE_URL, PlaceholderImageGenerator};
pub use scripted::ScriptedTextGenerator;
