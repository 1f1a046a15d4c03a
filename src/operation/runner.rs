//! Task-wrapped execution of one provider call.

use super::{OperationError, OperationResult};
use crate::gateway::domain::GatewayError;
use crate::task::{
    domain::{NewTask, Payload, Task, TaskArtifact, TaskCompletion, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Builds a payload from literal key/value pairs.
pub(crate) fn payload<const N: usize>(entries: [(&str, Value); N]) -> Payload {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

/// Normalised provider result ready to be committed with its task.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome<V> {
    /// Task output payload.
    pub output_data: Payload,
    /// Model that served the call.
    pub model_used: String,
    /// Tokens consumed by the call.
    pub tokens_used: u32,
    /// Result entities committed with the task.
    pub artifacts: Vec<TaskArtifact>,
    /// Value returned to the caller.
    pub value: V,
}

/// A committed operation: the completed task and the caller's value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOperation<V> {
    /// The completed task.
    pub task: Task,
    /// Operation-specific result.
    pub value: V,
}

impl<V> CompletedOperation<V> {
    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task.id()
    }
}

/// Runs provider calls inside the task lifecycle.
pub struct OperationRunner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<TaskLifecycleService<R, C>>,
}

impl<R, C> Clone for OperationRunner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<R, C> OperationRunner<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a runner over a shared lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<TaskLifecycleService<R, C>>) -> Self {
        Self { tasks }
    }

    /// Returns the lifecycle service.
    #[must_use]
    pub fn tasks(&self) -> &TaskLifecycleService<R, C> {
        &self.tasks
    }

    /// Returns the clock shared with the lifecycle service.
    #[must_use]
    pub fn clock(&self) -> &C {
        self.tasks.clock()
    }

    /// Creates a task for `request`, awaits `call`, and settles the task.
    ///
    /// `settle` turns the provider response into the task output and result
    /// entities. The completed task and its entities are committed in one
    /// write; when `call`, `settle`, or the commit fails the task is marked
    /// `failed` and the error is returned. A rejection at any point before
    /// the commit aborts the call and yields [`OperationError::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns the first failure of the lifecycle bookkeeping, the provider
    /// call, result construction, or the commit.
    pub async fn run<O, V, F, S>(
        &self,
        request: NewTask,
        call: F,
        settle: S,
    ) -> OperationResult<CompletedOperation<V>>
    where
        F: Future<Output = Result<O, GatewayError>> + Send,
        S: FnOnce(&Task, O) -> OperationResult<OperationOutcome<V>> + Send,
        O: Send,
        V: Send,
    {
        let created = self.tasks.create(request).await?;
        let task_id = created.id();
        let task = match self.tasks.begin_processing(created).await {
            Ok(task) => task,
            Err(err) if rejected(&err) => {
                tracing::info!(task_id = %task_id, "task rejected before its provider call");
                return Err(OperationError::Cancelled(task_id));
            }
            Err(err) => return Err(err.into()),
        };
        let token = self.tasks.in_flight().register(task_id);
        let started = self.clock().utc();
        let response = tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = call => Some(result),
        };
        self.tasks.in_flight().release(task_id);
        let Some(result) = response else {
            tracing::info!(task_id = %task_id, "provider call cancelled by rejection");
            return Err(OperationError::Cancelled(task_id));
        };
        let processing_time = (self.clock().utc() - started)
            .to_std()
            .unwrap_or_default();

        let outcome = match result
            .map_err(OperationError::from)
            .and_then(|response| settle(&task, response))
        {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.abandon(task, err).await),
        };

        let completion = TaskCompletion {
            output_data: outcome.output_data,
            model_used: outcome.model_used,
            tokens_used: outcome.tokens_used,
            processing_time,
        };
        match self
            .tasks
            .complete_with_artifacts(task.clone(), completion, &outcome.artifacts)
            .await
        {
            Ok(completed) => Ok(CompletedOperation {
                task: completed,
                value: outcome.value,
            }),
            Err(err) => Err(self.abandon(task, err.into()).await),
        }
    }

    /// Records `err` on the processing task and returns the error to
    /// surface.
    async fn abandon(&self, task: Task, err: OperationError) -> OperationError {
        let task_id = task.id();
        if was_cancelled(&err) {
            return OperationError::Cancelled(task_id);
        }
        let message = err.to_string();
        match self.tasks.fail(task, &message).await {
            Ok(_) => {
                tracing::error!(task_id = %task_id, error = %err, "operation failed");
                err
            }
            Err(fail_err) if rejected(&fail_err) => {
                OperationError::Cancelled(task_id)
            }
            Err(fail_err) => {
                tracing::error!(
                    task_id = %task_id,
                    error = %err,
                    bookkeeping_error = %fail_err,
                    "operation failed and the failure could not be recorded"
                );
                err
            }
        }
    }
}

const fn was_cancelled(err: &OperationError) -> bool {
    matches!(err, OperationError::Task(lifecycle) if rejected(lifecycle))
}

/// Whether a write lost its race against a rejection.
const fn rejected(err: &TaskLifecycleError) -> bool {
    matches!(err.conflicting_status(), Some(TaskStatus::Cancelled))
}
