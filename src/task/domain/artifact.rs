//! Result entities committed together with a completed task.

use crate::content::domain::GeneratedContent;
use crate::translation::domain::TranslationJob;

/// Result entity owned by a task and persisted in its completion commit.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskArtifact {
    /// Generated text artifact.
    Content(GeneratedContent),
    /// Completed translation unit.
    Translation(TranslationJob),
}

impl TaskArtifact {
    /// Returns the owning task identifier recorded on the artifact.
    #[must_use]
    pub const fn task_id(&self) -> super::TaskId {
        match self {
            Self::Content(content) => content.task_id(),
            Self::Translation(job) => job.task_id(),
        }
    }
}
