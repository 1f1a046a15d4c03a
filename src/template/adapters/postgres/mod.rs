//! `PostgreSQL` adapter for content templates.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTemplateRepository;
