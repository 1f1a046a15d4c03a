//! Repository port for task persistence, guarded status updates, and
//! atomic completion commits.

use crate::actor::ActorId;
use crate::paging::Page;
use crate::task::domain::{Task, TaskArtifact, TaskId, TaskStatus, TaskType};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Equality filters applied when listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Task type.
    pub task_type: Option<TaskType>,
    /// Lifecycle status.
    pub status: Option<TaskStatus>,
    /// Initiating actor.
    pub created_by: Option<ActorId>,
}

impl TaskFilter {
    /// Restricts results to one task type.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to tasks created by `actor`.
    #[must_use]
    pub fn created_by(mut self, actor: ActorId) -> Self {
        self.created_by = Some(actor);
        self
    }

    /// Returns whether `task` satisfies every set filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.task_type.is_none_or(|kind| kind == task.task_type())
            && self.status.is_none_or(|status| status == task.status())
            && self
                .created_by
                .as_ref()
                .is_none_or(|actor| actor == task.created_by())
    }
}

/// Aggregate task counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStatistics {
    /// Total tasks.
    pub total: u64,
    /// Tasks per status.
    pub by_status: BTreeMap<TaskStatus, u64>,
    /// Tasks per type.
    pub by_type: BTreeMap<TaskType, u64>,
}

impl TaskStatistics {
    /// Counts one task.
    pub fn record(&mut self, status: TaskStatus, task_type: TaskType) {
        self.total += 1;
        *self.by_status.entry(status).or_default() += 1;
        *self.by_type.entry(task_type).or_default() += 1;
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task if its stored status still
    /// equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::StatusConflict`] when another writer moved
    /// the task first.
    async fn update(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()>;

    /// Persists a completed task together with its result entities.
    ///
    /// Either everything is written or nothing is. The stored task must
    /// still be `processing`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::StatusConflict`] when the stored task is
    /// no longer processing, [`TaskRepositoryError::ArtifactOwnerMismatch`]
    /// when an artifact belongs to another task, and
    /// [`TaskRepositoryError::Persistence`] on write failure.
    async fn commit_completion(
        &self,
        task: &Task,
        artifacts: &[TaskArtifact],
    ) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching `filter`, newest first.
    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task and its owned result entities, returning whether a
    /// task was removed.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Aggregates counts, optionally restricted to one creator.
    async fn statistics(
        &self,
        created_by: Option<&ActorId>,
    ) -> TaskRepositoryResult<TaskStatistics>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status differs from the status the writer expected.
    #[error("task {task_id} status conflict: expected {expected}, found {actual}")]
    StatusConflict {
        /// Task identifier.
        task_id: TaskId,
        /// Status the writer read.
        expected: TaskStatus,
        /// Status currently stored.
        actual: TaskStatus,
    },

    /// A result entity names a different owning task.
    #[error("artifact owned by {artifact_task} cannot be committed with task {task_id}")]
    ArtifactOwnerMismatch {
        /// Task being committed.
        task_id: TaskId,
        /// Owner recorded on the artifact.
        artifact_task: TaskId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
