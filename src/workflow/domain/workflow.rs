//! Workflow entity.

use super::{WorkflowDomainError, WorkflowId, WorkflowType};
use crate::actor::ActorId;
use crate::task::domain::Payload;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_NAME_LENGTH: usize = 255;

/// Parameter object for creating a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkflow {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Handler key.
    pub workflow_type: WorkflowType,
    /// Handler-specific configuration.
    pub config: Payload,
    /// Whether the workflow accepts triggers.
    pub is_active: bool,
    /// Creating actor.
    pub created_by: ActorId,
}

impl NewWorkflow {
    /// Creates a request for an active workflow with an empty
    /// configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, workflow_type: WorkflowType, created_by: ActorId) -> Self {
        Self {
            name: name.into(),
            description: None,
            workflow_type,
            config: Payload::new(),
            is_active: true,
            created_by,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the handler configuration.
    #[must_use]
    pub fn with_config(mut self, config: Payload) -> Self {
        self.config = config;
        self
    }

    /// Creates the workflow deactivated when `is_active` is false.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Field-level update applied to a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement configuration.
    pub config: Option<Payload>,
    /// Replacement activation flag.
    pub is_active: Option<bool>,
}

impl WorkflowPatch {
    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement configuration.
    #[must_use]
    pub fn with_config(mut self, config: Payload) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the replacement activation flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// A configured automation.
///
/// The workflow type is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    id: WorkflowId,
    name: String,
    description: Option<String>,
    workflow_type: WorkflowType,
    config: Payload,
    is_active: bool,
    created_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Creates a workflow from a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError`] when the name is invalid.
    pub fn new(request: NewWorkflow, clock: &impl Clock) -> Result<Self, WorkflowDomainError> {
        let name = validate_name(&request.name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: WorkflowId::new(),
            name,
            description: request.description,
            workflow_type: request.workflow_type,
            config: request.config,
            is_active: request.is_active,
            created_by: request.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the workflow identifier.
    #[must_use]
    pub const fn id(&self) -> WorkflowId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the handler key.
    #[must_use]
    pub const fn workflow_type(&self) -> &WorkflowType {
        &self.workflow_type
    }

    /// Returns the handler configuration.
    #[must_use]
    pub const fn config(&self) -> &Payload {
        &self.config
    }

    /// Returns whether the workflow may be triggered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creating actor.
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

    /// Applies an update.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError`] when a replacement name is invalid;
    /// the workflow is left unchanged.
    pub fn apply(
        &mut self,
        patch: WorkflowPatch,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        if let Some(name) = patch.name.as_deref().map(validate_name).transpose()? {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(config) = patch.config {
            self.config = config;
        }
        if let Some(flag) = patch.is_active {
            self.is_active = flag;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, WorkflowDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorkflowDomainError::EmptyName);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_NAME_LENGTH {
        return Err(WorkflowDomainError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}
