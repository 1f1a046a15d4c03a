//! Task aggregate root and lifecycle transitions.

use super::{TaskDomainError, TaskId, TaskStatus, TaskType};
use crate::actor::ActorId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Structured key-value payload carried by tasks and result entities.
pub type Payload = serde_json::Map<String, Value>;

/// Approval trail recorded when a reviewer signs off on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// Actor that approved the task.
    pub approved_by: ActorId,
    /// Time of approval.
    pub approved_at: DateTime<Utc>,
}

/// Parameter object for creating a task in `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Kind of AI operation.
    pub task_type: TaskType,
    /// Operation input, opaque to the lifecycle.
    pub input_data: Payload,
    /// Prompt sent to the provider, possibly empty.
    pub prompt: String,
    /// Whether the task output needs human review.
    pub requires_approval: bool,
    /// Initiating actor.
    pub created_by: ActorId,
}

impl NewTask {
    /// Creates a request with the approval default of `task_type`.
    #[must_use]
    pub fn new(task_type: TaskType, created_by: ActorId) -> Self {
        Self {
            task_type,
            input_data: Payload::new(),
            prompt: String::new(),
            requires_approval: task_type.requires_approval_by_default(),
            created_by,
        }
    }

    /// Sets the operation input payload.
    #[must_use]
    pub fn with_input(mut self, input_data: Payload) -> Self {
        self.input_data = input_data;
        self
    }

    /// Sets the provider prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Overrides the approval requirement.
    #[must_use]
    pub const fn with_requires_approval(mut self, requires_approval: bool) -> Self {
        self.requires_approval = requires_approval;
        self
    }
}

/// Provider outcome recorded when a task completes.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCompletion {
    /// Normalised operation output.
    pub output_data: Payload,
    /// Model that served the call.
    pub model_used: String,
    /// Tokens consumed by the call.
    pub tokens_used: u32,
    /// Wall-clock duration of the provider call.
    pub processing_time: Duration,
}

/// Result of a [`Task::fail`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOutcome {
    /// The task moved from `processing` to `failed`.
    Failed,
    /// The task was already failed with the same message; nothing changed.
    AlreadyFailed,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    task_type: TaskType,
    status: TaskStatus,
    input_data: Payload,
    output_data: Option<Payload>,
    prompt: String,
    model_used: Option<String>,
    tokens_used: u32,
    processing_time: f64,
    error_message: Option<String>,
    requires_approval: bool,
    approval: Option<Approval>,
    created_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task type.
    pub task_type: TaskType,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted input payload.
    pub input_data: Payload,
    /// Persisted output payload, if completed.
    pub output_data: Option<Payload>,
    /// Persisted provider prompt.
    pub prompt: String,
    /// Persisted model name.
    pub model_used: Option<String>,
    /// Persisted token usage.
    pub tokens_used: u32,
    /// Persisted processing time in seconds.
    pub processing_time: f64,
    /// Persisted failure or rejection message.
    pub error_message: Option<String>,
    /// Persisted approval requirement.
    pub requires_approval: bool,
    /// Persisted approval trail.
    pub approval: Option<Approval>,
    /// Persisted initiating actor.
    pub created_by: ActorId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Pending`].
    #[must_use]
    pub fn new(request: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            task_type: request.task_type,
            status: TaskStatus::Pending,
            input_data: request.input_data,
            output_data: None,
            prompt: request.prompt,
            model_used: None,
            tokens_used: 0,
            processing_time: 0.0,
            error_message: None,
            requires_approval: request.requires_approval,
            approval: None,
            created_by: request.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_type: data.task_type,
            status: data.status,
            input_data: data.input_data,
            output_data: data.output_data,
            prompt: data.prompt,
            model_used: data.model_used,
            tokens_used: data.tokens_used,
            processing_time: data.processing_time,
            error_message: data.error_message,
            requires_approval: data.requires_approval,
            approval: data.approval,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the input payload.
    #[must_use]
    pub const fn input_data(&self) -> &Payload {
        &self.input_data
    }

    /// Returns the output payload, present only once completed.
    #[must_use]
    pub const fn output_data(&self) -> Option<&Payload> {
        self.output_data.as_ref()
    }

    /// Returns the provider prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the model that served the call, if known.
    #[must_use]
    pub fn model_used(&self) -> Option<&str> {
        self.model_used.as_deref()
    }

    /// Returns the tokens consumed.
    #[must_use]
    pub const fn tokens_used(&self) -> u32 {
        self.tokens_used
    }

    /// Returns the provider call duration in seconds.
    #[must_use]
    pub const fn processing_time(&self) -> f64 {
        self.processing_time
    }

    /// Returns the failure or rejection message.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns whether the task needs human review.
    #[must_use]
    pub const fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    /// Returns the approval trail, if approved.
    #[must_use]
    pub const fn approval(&self) -> Option<&Approval> {
        self.approval.as_ref()
    }

    /// Returns whether the task has been approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approval.is_some()
    }

    /// Returns the initiating actor.
    #[must_use]
    pub const fn created_by(&self) -> &ActorId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task from `pending` to `processing`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// not pending.
    pub fn begin_processing(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Processing)?;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task from `processing` to `completed` and records the
    /// provider outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// not processing.
    pub fn complete(
        &mut self,
        completion: TaskCompletion,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Completed)?;
        self.output_data = Some(completion.output_data);
        self.model_used = Some(completion.model_used);
        self.tokens_used = completion.tokens_used;
        self.processing_time = completion.processing_time.as_secs_f64();
        self.touch(clock);
        Ok(())
    }

    /// Moves the task from `processing` to `failed`.
    ///
    /// Repeating the call with the message already recorded on a failed
    /// task is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyErrorMessage`] for a blank message and
    /// [`TaskDomainError::InvalidStateTransition`] when the task is neither
    /// processing nor already failed with the same message.
    pub fn fail(
        &mut self,
        message: &str,
        clock: &impl Clock,
    ) -> Result<FailOutcome, TaskDomainError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyErrorMessage);
        }
        if self.status == TaskStatus::Failed && self.error_message.as_deref() == Some(trimmed) {
            return Ok(FailOutcome::AlreadyFailed);
        }
        self.transition_to(TaskStatus::Failed)?;
        self.error_message = Some(trimmed.to_owned());
        self.touch(clock);
        Ok(FailOutcome::Failed)
    }

    /// Records reviewer approval. Allowed from every status.
    pub fn approve(&mut self, approved_by: ActorId, clock: &impl Clock) {
        let approved_at = clock.utc();
        self.approval = Some(Approval {
            approved_by,
            approved_at,
        });
        self.updated_at = approved_at;
    }

    /// Forces a non-terminal task to `cancelled`, recording the reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// already terminal.
    pub fn reject(
        &mut self,
        reason: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Cancelled)?;
        let stated = reason
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("No reason provided");
        self.error_message = Some(format!("Rejected by user: {stated}"));
        self.touch(clock);
        Ok(())
    }

    /// Keeps the approval recorded on `stored` when this copy has none.
    ///
    /// Approval may land while a provider call is running, so a status
    /// write from a copy loaded before it must not erase it.
    pub(crate) fn keep_approval_from(&mut self, stored: &Self) {
        if self.approval.is_none() {
            self.approval.clone_from(&stored.approval);
        }
    }

    fn transition_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
