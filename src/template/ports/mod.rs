//! Port contracts for template persistence.

mod repository;

pub use repository::{
    TemplateFilter, TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult,
};
