//! `PostgreSQL` adapters for tasks and the result entities they own.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
