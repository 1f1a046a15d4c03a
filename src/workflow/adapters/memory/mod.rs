//! In-memory workflow adapters.

mod history;
mod repository;

pub use history::InMemoryExecutionHistory;
pub use repository::InMemoryWorkflowRepository;
