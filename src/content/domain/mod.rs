//! Domain model for generated content.

mod content;
mod error;
mod ids;

pub use content::{
    ContentPatch, ContentType, GeneratedContent, NewGeneratedContent, PersistedContentData,
    Publication,
};
pub use error::{ContentDomainError, ParseContentTypeError};
pub use ids::ContentId;
