//! In-memory store for tasks and the result entities they own.
//!
//! Tasks, generated content, and translation jobs share one lock so that
//! completion commits and cascade deletes are observed atomically.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::actor::ActorId;
use crate::content::{
    domain::{ContentId, GeneratedContent},
    ports::{
        ContentFilter, ContentRepository, ContentRepositoryError, ContentRepositoryResult,
        ContentStatistics,
    },
};
use crate::paging::Page;
use crate::task::{
    domain::{Task, TaskArtifact, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatistics},
};
use crate::translation::{
    domain::{TranslationJob, TranslationJobId},
    ports::{
        TranslationJobRepository, TranslationJobRepositoryError, TranslationJobRepositoryResult,
    },
};

/// Thread-safe in-memory store implementing the task, content, and
/// translation job ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug)]
struct Stored<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct StoreState {
    next_seq: u64,
    tasks: HashMap<TaskId, Stored<Task>>,
    contents: HashMap<ContentId, Stored<GeneratedContent>>,
    jobs: HashMap<TranslationJobId, Stored<TranslationJob>>,
    commit_failure: Option<String>,
}

impl StoreState {
    const fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next [`TaskRepository::commit_completion`] call fail with
    /// `message` without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the store lock is poisoned.
    pub fn fail_next_commit(&self, message: impl Into<String>) -> std::io::Result<()> {
        let mut state = self.write()?;
        state.commit_failure = Some(message.into());
        Ok(())
    }

    fn read(&self) -> std::io::Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> std::io::Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

/// Collects values newest first; later inserts win timestamp ties.
fn newest_first<'a, T: 'a>(
    items: impl Iterator<Item = &'a Stored<T>>,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<&'a T> {
    let mut sorted: Vec<&Stored<T>> = items.collect();
    sorted.sort_by(|left, right| {
        created_at(&right.value)
            .cmp(&created_at(&left.value))
            .then(right.seq.cmp(&left.seq))
    });
    sorted.into_iter().map(|stored| &stored.value).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let seq = state.bump();
        state.tasks.insert(
            task.id(),
            Stored {
                seq,
                value: task.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        let actual = stored.value.status();
        if actual != expected {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: task.id(),
                expected,
                actual,
            });
        }
        let mut written = task.clone();
        written.keep_approval_from(&stored.value);
        stored.value = written;
        Ok(())
    }

    async fn commit_completion(
        &self,
        task: &Task,
        artifacts: &[TaskArtifact],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if let Some(message) = state.commit_failure.take() {
            return Err(TaskRepositoryError::persistence(std::io::Error::other(
                message,
            )));
        }
        let actual = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .value
            .status();
        if actual != TaskStatus::Processing {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: task.id(),
                expected: TaskStatus::Processing,
                actual,
            });
        }
        if let Some(foreign) = artifacts.iter().find(|artifact| artifact.task_id() != task.id()) {
            return Err(TaskRepositoryError::ArtifactOwnerMismatch {
                task_id: task.id(),
                artifact_task: foreign.task_id(),
            });
        }

        for artifact in artifacts {
            let seq = state.bump();
            match artifact {
                TaskArtifact::Content(content) => {
                    state.contents.insert(
                        content.id(),
                        Stored {
                            seq,
                            value: content.clone(),
                        },
                    );
                }
                TaskArtifact::Translation(job) => {
                    state.jobs.insert(
                        job.id(),
                        Stored {
                            seq,
                            value: job.clone(),
                        },
                    );
                }
            }
        }
        if let Some(stored) = state.tasks.get_mut(&task.id()) {
            let mut written = task.clone();
            written.keep_approval_from(&stored.value);
            stored.value = written;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).map(|stored| stored.value.clone()))
    }

    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let matching = state
            .tasks
            .values()
            .filter(|stored| filter.matches(&stored.value));
        let ordered = newest_first(matching, Task::created_at);
        Ok(page.apply(ordered.into_iter().cloned()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.remove(&id).is_none() {
            return Ok(false);
        }
        state.contents.retain(|_, stored| stored.value.task_id() != id);
        state.jobs.retain(|_, stored| stored.value.task_id() != id);
        Ok(true)
    }

    async fn statistics(
        &self,
        created_by: Option<&ActorId>,
    ) -> TaskRepositoryResult<TaskStatistics> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut stats = TaskStatistics::default();
        state
            .tasks
            .values()
            .map(|stored| &stored.value)
            .filter(|task| created_by.is_none_or(|actor| actor == task.created_by()))
            .for_each(|task| stats.record(task.status(), task.task_type()));
        Ok(stats)
    }
}

#[async_trait]
impl ContentRepository for InMemoryTaskStore {
    async fn find_by_id(&self, id: ContentId) -> ContentRepositoryResult<Option<GeneratedContent>> {
        let state = self.read().map_err(ContentRepositoryError::persistence)?;
        Ok(state.contents.get(&id).map(|stored| stored.value.clone()))
    }

    async fn list(
        &self,
        filter: &ContentFilter,
        page: Page,
    ) -> ContentRepositoryResult<Vec<GeneratedContent>> {
        let state = self.read().map_err(ContentRepositoryError::persistence)?;
        let matching = state
            .contents
            .values()
            .filter(|stored| filter.matches(&stored.value));
        let ordered = newest_first(matching, GeneratedContent::created_at);
        Ok(page.apply(ordered.into_iter().cloned()))
    }

    async fn update(&self, content: &GeneratedContent) -> ContentRepositoryResult<()> {
        let mut state = self.write().map_err(ContentRepositoryError::persistence)?;
        let stored = state
            .contents
            .get_mut(&content.id())
            .ok_or(ContentRepositoryError::NotFound(content.id()))?;
        stored.value = content.clone();
        Ok(())
    }

    async fn delete(&self, id: ContentId) -> ContentRepositoryResult<bool> {
        let mut state = self.write().map_err(ContentRepositoryError::persistence)?;
        Ok(state.contents.remove(&id).is_some())
    }

    async fn statistics(&self) -> ContentRepositoryResult<ContentStatistics> {
        let state = self.read().map_err(ContentRepositoryError::persistence)?;
        let mut stats = ContentStatistics::default();
        for stored in state.contents.values() {
            stats.record(stored.value.content_type(), stored.value.is_published());
        }
        Ok(stats)
    }
}

#[async_trait]
impl TranslationJobRepository for InMemoryTaskStore {
    async fn find_by_id(
        &self,
        id: TranslationJobId,
    ) -> TranslationJobRepositoryResult<Option<TranslationJob>> {
        let state = self
            .read()
            .map_err(TranslationJobRepositoryError::persistence)?;
        Ok(state.jobs.get(&id).map(|stored| stored.value.clone()))
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> TranslationJobRepositoryResult<Vec<TranslationJob>> {
        let state = self
            .read()
            .map_err(TranslationJobRepositoryError::persistence)?;
        let mut owned: Vec<&Stored<TranslationJob>> = state
            .jobs
            .values()
            .filter(|stored| stored.value.task_id() == task_id)
            .collect();
        owned.sort_by_key(|stored| stored.seq);
        Ok(owned.into_iter().map(|stored| stored.value.clone()).collect())
    }
}
