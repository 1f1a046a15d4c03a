//! In-memory workflow repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::actor::ActorId;
use crate::workflow::{
    domain::{Workflow, WorkflowId},
    ports::{WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult},
};

/// Thread-safe in-memory workflow registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowRepository {
    state: Arc<RwLock<WorkflowState>>,
}

#[derive(Debug, Default)]
struct WorkflowState {
    next_seq: u64,
    workflows: HashMap<WorkflowId, (u64, Workflow)>,
}

impl InMemoryWorkflowRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> WorkflowRepositoryError {
    WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn store(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.workflows.contains_key(&workflow.id()) {
            return Err(WorkflowRepositoryError::DuplicateWorkflow(workflow.id()));
        }
        state.next_seq += 1;
        let seq = state.next_seq;
        state.workflows.insert(workflow.id(), (seq, workflow.clone()));
        Ok(())
    }

    async fn update(&self, workflow: &Workflow) -> WorkflowRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let entry = state
            .workflows
            .get_mut(&workflow.id())
            .ok_or(WorkflowRepositoryError::NotFound(workflow.id()))?;
        entry.1 = workflow.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: WorkflowId) -> WorkflowRepositoryResult<Option<Workflow>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.workflows.get(&id).map(|(_, workflow)| workflow.clone()))
    }

    async fn list(&self, created_by: Option<&ActorId>) -> WorkflowRepositoryResult<Vec<Workflow>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<&(u64, Workflow)> = state
            .workflows
            .values()
            .filter(|(_, workflow)| created_by.is_none_or(|actor| workflow.created_by() == actor))
            .collect();
        matching.sort_by_key(|(seq, workflow)| (Reverse(workflow.created_at()), Reverse(*seq)));
        Ok(matching
            .into_iter()
            .map(|(_, workflow)| workflow.clone())
            .collect())
    }

    async fn delete(&self, id: WorkflowId) -> WorkflowRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.workflows.remove(&id).is_some())
    }
}
