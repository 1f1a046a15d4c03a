//! Port contracts for generated content persistence.

mod repository;

pub use repository::{
    ContentFilter, ContentRepository, ContentRepositoryError, ContentRepositoryResult,
    ContentStatistics,
};
