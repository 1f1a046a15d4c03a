//! Dispatch table from workflow type to handler.

use crate::workflow::{domain::WorkflowType, ports::WorkflowHandler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handlers keyed by workflow type.
///
/// New workflow types are added by registering a handler; the orchestrator
/// does not change.
#[derive(Clone, Default)]
pub struct WorkflowHandlerRegistry {
    handlers: HashMap<WorkflowType, Arc<dyn WorkflowHandler>>,
}

impl WorkflowHandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `workflow_type`, replacing any previous one.
    pub fn register(&mut self, workflow_type: WorkflowType, handler: Arc<dyn WorkflowHandler>) {
        if self.handlers.insert(workflow_type.clone(), handler).is_some() {
            tracing::warn!(workflow_type = %workflow_type, "workflow handler replaced");
        }
    }

    /// Registers `handler` for `workflow_type` and returns the registry.
    #[must_use]
    pub fn with_handler(
        mut self,
        workflow_type: WorkflowType,
        handler: Arc<dyn WorkflowHandler>,
    ) -> Self {
        self.register(workflow_type, handler);
        self
    }

    /// Returns the handler for `workflow_type`.
    #[must_use]
    pub fn get(&self, workflow_type: &WorkflowType) -> Option<Arc<dyn WorkflowHandler>> {
        self.handlers.get(workflow_type).cloned()
    }

    /// Returns the registered types in name order.
    #[must_use]
    pub fn workflow_types(&self) -> Vec<WorkflowType> {
        let mut types: Vec<WorkflowType> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for WorkflowHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowHandlerRegistry")
            .field("workflow_types", &self.workflow_types())
            .finish()
    }
}
