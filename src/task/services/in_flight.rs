//! Cancellation handles for provider calls that are still running.

use crate::task::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Registry of cancellation tokens keyed by the task whose provider call is
/// in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightCalls {
    tokens: Arc<Mutex<HashMap<TaskId, CancellationToken>>>,
}

impl InFlightCalls {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh token for `task_id`, replacing any previous one.
    #[must_use]
    pub fn register(&self, task_id: TaskId) -> CancellationToken {
        let token = CancellationToken::new();
        self.tokens().insert(task_id, token.clone());
        token
    }

    /// Cancels the call registered for `task_id`, returning whether one was
    /// running.
    pub fn cancel(&self, task_id: TaskId) -> bool {
        let removed = self.tokens().remove(&task_id);
        removed.map(|token| token.cancel()).is_some()
    }

    /// Drops the token for `task_id` once its call has finished.
    pub fn release(&self, task_id: TaskId) {
        self.tokens().remove(&task_id);
    }

    /// Returns whether a call is registered for `task_id`.
    #[must_use]
    pub fn is_running(&self, task_id: TaskId) -> bool {
        self.tokens().contains_key(&task_id)
    }

    /// Locks the registry, recovering it if a holder panicked.
    fn tokens(&self) -> MutexGuard<'_, HashMap<TaskId, CancellationToken>> {
        self.tokens.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("in-flight call registry lock was poisoned; recovering it");
            poisoned.into_inner()
        })
    }
}
