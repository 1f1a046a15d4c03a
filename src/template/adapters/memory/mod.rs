//! In-memory template adapter.

mod repository;

pub use repository::InMemoryTemplateRepository;
