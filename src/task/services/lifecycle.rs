//! Service layer for task creation, status transitions, and review.

use super::InFlightCalls;
use crate::actor::ActorId;
use crate::error::ErrorKind;
use crate::paging::Page;
use crate::task::{
    domain::{
        FailOutcome, NewTask, Task, TaskArtifact, TaskCompletion, TaskDomainError, TaskId,
        TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskStatistics},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Attempts made by review operations before surfacing a status conflict.
const REVIEW_ATTEMPTS: usize = 3;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or state machine guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl TaskLifecycleError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(TaskDomainError::EmptyErrorMessage) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Domain(TaskDomainError::InvalidStateTransition { .. })
            | Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// Returns the stored status when a write lost a status race.
    #[must_use]
    pub const fn conflicting_status(&self) -> Option<TaskStatus> {
        match self {
            Self::Repository(TaskRepositoryError::StatusConflict { actual, .. }) => Some(*actual),
            _ => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    in_flight: InFlightCalls,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            in_flight: InFlightCalls::new(),
        }
    }

    /// Returns the registry of running provider calls.
    #[must_use]
    pub const fn in_flight(&self) -> &InFlightCalls {
        &self.in_flight
    }

    /// Returns the service clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Creates and persists a `pending` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: NewTask) -> TaskLifecycleResult<Task> {
        let task = Task::new(request, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            task_type = %task.task_type(),
            created_by = %task.created_by(),
            "task created"
        );
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Moves a task from `pending` to `processing`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is not pending and
    /// [`TaskLifecycleError::Repository`] when the stored task changed.
    pub async fn begin_processing(&self, mut task: Task) -> TaskLifecycleResult<Task> {
        let previous = task.status();
        task.begin_processing(&*self.clock)?;
        self.repository.update(&task, previous).await?;
        Ok(task)
    }

    /// Moves a task from `processing` to `completed` without result entities.
    ///
    /// # Errors
    ///
    /// See [`Self::complete_with_artifacts`].
    pub async fn complete(
        &self,
        task: Task,
        completion: TaskCompletion,
    ) -> TaskLifecycleResult<Task> {
        self.complete_with_artifacts(task, completion, &[]).await
    }

    /// Completes a task and persists its result entities in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is not processing
    /// and [`TaskLifecycleError::Repository`] when the commit fails; nothing
    /// is written in either case.
    pub async fn complete_with_artifacts(
        &self,
        mut task: Task,
        completion: TaskCompletion,
        artifacts: &[TaskArtifact],
    ) -> TaskLifecycleResult<Task> {
        task.complete(completion, &*self.clock)?;
        self.repository.commit_completion(&task, artifacts).await?;
        tracing::info!(
            task_id = %task.id(),
            task_type = %task.task_type(),
            tokens_used = task.tokens_used(),
            artifacts = artifacts.len(),
            "task completed"
        );
        Ok(task)
    }

    /// Moves a task from `processing` to `failed`.
    ///
    /// Repeating the call with the same message on a failed task returns the
    /// task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the transition is not
    /// allowed and [`TaskLifecycleError::Repository`] when the stored task
    /// changed.
    pub async fn fail(&self, mut task: Task, message: &str) -> TaskLifecycleResult<Task> {
        let previous = task.status();
        if task.fail(message, &*self.clock)? == FailOutcome::Failed {
            self.repository.update(&task, previous).await?;
            tracing::warn!(
                task_id = %task.id(),
                task_type = %task.task_type(),
                error = message,
                "task failed"
            );
        }
        Ok(task)
    }

    /// Records approval of a task in any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks.
    pub async fn approve(&self, id: TaskId, approved_by: ActorId) -> TaskLifecycleResult<Task> {
        let task = self
            .review(id, |task, clock| {
                task.approve(approved_by.clone(), clock);
                Ok(())
            })
            .await?;
        tracing::info!(task_id = %id, approved_by = %approved_by, "task approved");
        Ok(task)
    }

    /// Forces a non-terminal task to `cancelled` and cancels its running
    /// provider call, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks and
    /// [`TaskLifecycleError::Domain`] when the task is already terminal.
    pub async fn reject(
        &self,
        id: TaskId,
        rejected_by: &ActorId,
        reason: Option<&str>,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .review(id, |task, clock| task.reject(reason, clock))
            .await?;
        let interrupted = self.in_flight.cancel(id);
        tracing::info!(
            task_id = %id,
            rejected_by = %rejected_by,
            interrupted,
            "task rejected"
        );
        Ok(task)
    }

    /// Lists tasks matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list(&self, filter: &TaskFilter, page: Page) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter, page).await?)
    }

    /// Deletes a task and its result entities.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when nothing was deleted.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskLifecycleError::NotFound(id));
        }
        self.in_flight.cancel(id);
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Aggregates task counts, optionally for one creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn statistics(
        &self,
        created_by: Option<&ActorId>,
    ) -> TaskLifecycleResult<TaskStatistics> {
        Ok(self.repository.statistics(created_by).await?)
    }

    /// Loads, mutates, and writes back a task, reloading when a concurrent
    /// status change wins the race.
    async fn review<F>(&self, id: TaskId, mutate: F) -> TaskLifecycleResult<Task>
    where
        F: Fn(&mut Task, &C) -> Result<(), TaskDomainError> + Send + Sync,
    {
        let mut attempt = 1;
        loop {
            let mut task = self.get(id).await?;
            let previous = task.status();
            mutate(&mut task, &*self.clock)?;
            match self.repository.update(&task, previous).await {
                Ok(()) => return Ok(task),
                Err(TaskRepositoryError::StatusConflict { .. }) if attempt < REVIEW_ATTEMPTS => {
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
