//! Publishing services.

mod publishing;

pub use publishing::{PublishedContent, PublishingService, PublishingServiceError};
