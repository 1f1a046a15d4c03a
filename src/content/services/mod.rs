//! Application services for generated content management.

mod content;

pub use content::{ContentService, ContentServiceError, ContentServiceResult};
