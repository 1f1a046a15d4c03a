//! Port contracts for task persistence.

mod repository;

pub use repository::{
    TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatistics,
};
