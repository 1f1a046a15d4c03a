//! `PostgreSQL` repository implementation for tasks, generated content, and
//! translation jobs.

use super::{
    models::{ApprovalChangeset, ContentRow, TaskRow, TranslationJobRow},
    schema::{generated_content, tasks, translation_jobs},
};
use crate::actor::ActorId;
use crate::content::{
    domain::{
        ContentId, ContentType, GeneratedContent, PersistedContentData, Publication,
    },
    ports::{
        ContentFilter, ContentRepository, ContentRepositoryError, ContentRepositoryResult,
        ContentStatistics,
    },
};
use crate::database::{PersistenceFailure, PgPool, page_bounds, run_blocking};
use crate::language::Language;
use crate::paging::Page;
use crate::quality::QualityScore;
use crate::task::{
    domain::{
        Approval, Payload, PersistedTaskData, Task, TaskArtifact, TaskId, TaskStatus, TaskType,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatistics},
};
use crate::translation::{
    domain::{
        PersistedTranslationJobData, TranslationJob, TranslationJobId, TranslationStatus,
    },
    ports::{
        TranslationJobRepository, TranslationJobRepositoryError, TranslationJobRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed store implementing the task, content, and translation
/// job ports.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for ContentRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TranslationJobRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// Failure inside the completion transaction.
enum CommitFailure {
    Repository(TaskRepositoryError),
    Database(DieselError),
}

impl CommitFailure {
    fn into_repository_error(self) -> TaskRepositoryError {
        match self {
            Self::Repository(err) => err,
            Self::Database(err) => TaskRepositoryError::persistence(err),
        }
    }
}

impl From<DieselError> for CommitFailure {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_task_row(task)?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let row = to_task_row(task)?;
        let approval = to_approval_changeset(task);
        run_blocking(&self.pool, move |connection| {
            connection
                .transaction::<(), CommitFailure, _>(|tx| {
                    write_task(tx, &row, approval.as_ref(), expected)
                })
                .map_err(CommitFailure::into_repository_error)
        })
        .await
    }

    async fn commit_completion(
        &self,
        task: &Task,
        artifacts: &[TaskArtifact],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        if let Some(foreign) = artifacts.iter().find(|artifact| artifact.task_id() != task_id) {
            return Err(TaskRepositoryError::ArtifactOwnerMismatch {
                task_id,
                artifact_task: foreign.task_id(),
            });
        }
        let row = to_task_row(task)?;
        let approval = to_approval_changeset(task);
        let mut content_rows = Vec::new();
        let mut job_rows = Vec::new();
        for artifact in artifacts {
            match artifact {
                TaskArtifact::Content(content) => content_rows.push(to_content_row(content)?),
                TaskArtifact::Translation(job) => job_rows.push(to_job_row(job)),
            }
        }

        run_blocking(&self.pool, move |connection| {
            connection
                .transaction::<(), CommitFailure, _>(|tx| {
                    write_task(tx, &row, approval.as_ref(), TaskStatus::Processing)?;
                    if !content_rows.is_empty() {
                        diesel::insert_into(generated_content::table)
                            .values(&content_rows)
                            .execute(tx)?;
                    }
                    if !job_rows.is_empty() {
                        diesel::insert_into(translation_jobs::table)
                            .values(&job_rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(CommitFailure::into_repository_error)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        let (offset, limit) = page_bounds(page)?;
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(task_type) = criteria.task_type {
                query = query.filter(tasks::task_type.eq(task_type.as_str()));
            }
            if let Some(status) = criteria.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(actor) = criteria.created_by {
                query = query.filter(tasks::created_by.eq(actor.as_str().to_owned()));
            }
            let rows = query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn statistics(
        &self,
        created_by: Option<&ActorId>,
    ) -> TaskRepositoryResult<TaskStatistics> {
        let creator = created_by.map(|actor| actor.as_str().to_owned());
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table
                .select((tasks::status, tasks::task_type))
                .into_boxed();
            if let Some(actor) = creator {
                query = query.filter(tasks::created_by.eq(actor));
            }
            let pairs = query
                .load::<(String, String)>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut stats = TaskStatistics::default();
            for (status, task_type) in pairs {
                stats.record(
                    TaskStatus::try_from(status.as_str())
                        .map_err(TaskRepositoryError::persistence)?,
                    TaskType::try_from(task_type.as_str())
                        .map_err(TaskRepositoryError::persistence)?,
                );
            }
            Ok(stats)
        })
        .await
    }
}

#[async_trait]
impl ContentRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: ContentId) -> ContentRepositoryResult<Option<GeneratedContent>> {
        run_blocking(&self.pool, move |connection| {
            let row = generated_content::table
                .find(id.into_inner())
                .select(ContentRow::as_select())
                .first::<ContentRow>(connection)
                .optional()
                .map_err(ContentRepositoryError::persistence)?;
            row.map(row_to_content).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &ContentFilter,
        page: Page,
    ) -> ContentRepositoryResult<Vec<GeneratedContent>> {
        let criteria = filter.clone();
        let (offset, limit) = page_bounds(page)?;
        run_blocking(&self.pool, move |connection| {
            let mut query = generated_content::table
                .select(ContentRow::as_select())
                .into_boxed();
            if let Some(task_id) = criteria.task_id {
                query = query.filter(generated_content::task_id.eq(task_id.into_inner()));
            }
            if let Some(content_type) = criteria.content_type {
                query = query.filter(generated_content::content_type.eq(content_type.as_str()));
            }
            if let Some(language) = criteria.language {
                query = query.filter(generated_content::language.eq(language.as_str()));
            }
            if let Some(platform) = criteria.platform {
                query = query.filter(generated_content::platform.eq(platform));
            }
            if let Some(published) = criteria.published {
                query = query.filter(generated_content::published.eq(published));
            }
            let rows = query
                .order((
                    generated_content::created_at.desc(),
                    generated_content::id.desc(),
                ))
                .offset(offset)
                .limit(limit)
                .load::<ContentRow>(connection)
                .map_err(ContentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_content).collect()
        })
        .await
    }

    async fn update(&self, content: &GeneratedContent) -> ContentRepositoryResult<()> {
        let content_id = content.id();
        let row = to_content_row(content)?;
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(generated_content::table.find(content_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(ContentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ContentRepositoryError::NotFound(content_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ContentId) -> ContentRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(generated_content::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ContentRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn statistics(&self) -> ContentRepositoryResult<ContentStatistics> {
        run_blocking(&self.pool, move |connection| {
            let pairs = generated_content::table
                .select((generated_content::content_type, generated_content::published))
                .load::<(String, bool)>(connection)
                .map_err(ContentRepositoryError::persistence)?;
            let mut stats = ContentStatistics::default();
            for (content_type, published) in pairs {
                let kind = ContentType::try_from(content_type.as_str())
                    .map_err(ContentRepositoryError::persistence)?;
                stats.record(kind, published);
            }
            Ok(stats)
        })
        .await
    }
}

#[async_trait]
impl TranslationJobRepository for PostgresTaskRepository {
    async fn find_by_id(
        &self,
        id: TranslationJobId,
    ) -> TranslationJobRepositoryResult<Option<TranslationJob>> {
        run_blocking(&self.pool, move |connection| {
            let row = translation_jobs::table
                .find(id.into_inner())
                .select(TranslationJobRow::as_select())
                .first::<TranslationJobRow>(connection)
                .optional()
                .map_err(TranslationJobRepositoryError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> TranslationJobRepositoryResult<Vec<TranslationJob>> {
        run_blocking(&self.pool, move |connection| {
            let rows = translation_jobs::table
                .filter(translation_jobs::task_id.eq(task_id.into_inner()))
                .order(translation_jobs::created_at.asc())
                .select(TranslationJobRow::as_select())
                .load::<TranslationJobRow>(connection)
                .map_err(TranslationJobRepositoryError::persistence)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }
}

/// Writes `row` when the stored status is still `expected`.
///
/// The approval columns are only written when the caller's copy carries an
/// approval, so an approval stored after that copy was loaded survives.
fn write_task(
    tx: &mut PgConnection,
    row: &TaskRow,
    approval: Option<&ApprovalChangeset>,
    expected: TaskStatus,
) -> Result<(), CommitFailure> {
    let guarded = tasks::table
        .filter(tasks::id.eq(row.id))
        .filter(tasks::status.eq(expected.as_str()));
    let updated = diesel::update(guarded).set(row).execute(tx)?;
    if updated == 0 {
        return Err(CommitFailure::Repository(missing_or_conflict(
            tx,
            TaskId::from_uuid(row.id),
            expected,
        )));
    }
    if let Some(changes) = approval {
        diesel::update(tasks::table.find(row.id))
            .set(changes)
            .execute(tx)?;
    }
    Ok(())
}

/// Explains why a guarded update touched no rows.
fn missing_or_conflict(
    connection: &mut PgConnection,
    task_id: TaskId,
    expected: TaskStatus,
) -> TaskRepositoryError {
    let stored = tasks::table
        .find(task_id.into_inner())
        .select(tasks::status)
        .first::<String>(connection)
        .optional();
    match stored {
        Ok(None) => TaskRepositoryError::NotFound(task_id),
        Ok(Some(raw)) => match TaskStatus::try_from(raw.as_str()) {
            Ok(actual) => TaskRepositoryError::StatusConflict {
                task_id,
                expected,
                actual,
            },
            Err(err) => TaskRepositoryError::persistence(err),
        },
        Err(err) => TaskRepositoryError::persistence(err),
    }
}

fn payload_from<E: PersistenceFailure>(value: Value) -> Result<Payload, E> {
    serde_json::from_value(value).map_err(E::from_failure)
}

fn score_from<E: PersistenceFailure>(value: Option<f64>) -> Result<Option<QualityScore>, E> {
    value
        .map(QualityScore::new)
        .transpose()
        .map_err(E::from_failure)
}

fn to_task_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let tokens_used = i32::try_from(task.tokens_used()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskRow {
        id: task.id().into_inner(),
        task_type: task.task_type().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        input_data: Value::Object(task.input_data().clone()),
        output_data: task.output_data().cloned().map(Value::Object),
        prompt: task.prompt().to_owned(),
        model_used: task.model_used().map(str::to_owned),
        tokens_used,
        processing_time: task.processing_time(),
        error_message: task.error_message().map(str::to_owned),
        requires_approval: task.requires_approval(),
        approved: task.is_approved(),
        approved_by: task
            .approval()
            .map(|approval| approval.approved_by.as_str().to_owned()),
        approved_at: task.approval().map(|approval| approval.approved_at),
        created_by: task.created_by().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_approval_changeset(task: &Task) -> Option<ApprovalChangeset> {
    task.approval().map(|approval| ApprovalChangeset {
        approved: true,
        approved_by: approval.approved_by.as_str().to_owned(),
        approved_at: approval.approved_at,
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let approval = if let (true, Some(approved_by), Some(approved_at)) =
        (row.approved, row.approved_by, row.approved_at)
    {
        Some(Approval {
            approved_by: ActorId::new(approved_by).map_err(TaskRepositoryError::persistence)?,
            approved_at,
        })
    } else {
        None
    };

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        task_type: TaskType::try_from(row.task_type.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(row.status.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        input_data: payload_from(row.input_data)?,
        output_data: row.output_data.map(payload_from).transpose()?,
        prompt: row.prompt,
        model_used: row.model_used,
        tokens_used: u32::try_from(row.tokens_used).map_err(TaskRepositoryError::persistence)?,
        processing_time: row.processing_time,
        error_message: row.error_message,
        requires_approval: row.requires_approval,
        approval,
        created_by: ActorId::new(row.created_by).map_err(TaskRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_content_row<E: PersistenceFailure>(content: &GeneratedContent) -> Result<ContentRow, E> {
    let publication = content.publication();
    Ok(ContentRow {
        id: content.id().into_inner(),
        task_id: content.task_id().into_inner(),
        content_type: content.content_type().as_str().to_owned(),
        title: content.title().map(str::to_owned),
        body: content.body().to_owned(),
        language: content.language().as_str().to_owned(),
        platform: content.platform().map(str::to_owned),
        metadata: Value::Object(content.metadata().clone()),
        quality_score: content.quality_score().map(QualityScore::value),
        published: publication.is_some(),
        published_at: publication.map(|marker| marker.published_at),
        external_id: publication.and_then(|marker| marker.external_id.clone()),
        created_at: content.created_at(),
        updated_at: content.updated_at(),
    })
}

fn row_to_content(row: ContentRow) -> ContentRepositoryResult<GeneratedContent> {
    let publication = row.published.then(|| Publication {
        published_at: row.published_at.unwrap_or(row.updated_at),
        external_id: row.external_id,
    });
    let data = PersistedContentData {
        id: ContentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        content_type: ContentType::try_from(row.content_type.as_str())
            .map_err(ContentRepositoryError::persistence)?,
        title: row.title,
        body: row.body,
        language: Language::try_from(row.language.as_str())
            .map_err(ContentRepositoryError::persistence)?,
        platform: row.platform,
        metadata: payload_from(row.metadata)?,
        quality_score: score_from(row.quality_score)?,
        publication,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(GeneratedContent::from_persisted(data))
}

fn to_job_row(job: &TranslationJob) -> TranslationJobRow {
    TranslationJobRow {
        id: job.id().into_inner(),
        task_id: job.task_id().into_inner(),
        source_language: job.source_language().as_str().to_owned(),
        target_language: job.target_language().as_str().to_owned(),
        source_text: job.source_text().to_owned(),
        translated_text: job.translated_text().map(str::to_owned),
        status: job.status().as_str().to_owned(),
        quality_score: job.quality_score().map(QualityScore::value),
        error_message: job.error_message().map(str::to_owned),
        created_at: job.created_at(),
        updated_at: job.updated_at(),
    }
}

fn row_to_job(row: TranslationJobRow) -> TranslationJobRepositoryResult<TranslationJob> {
    let data = PersistedTranslationJobData {
        id: TranslationJobId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        source_language: Language::try_from(row.source_language.as_str())
            .map_err(TranslationJobRepositoryError::persistence)?,
        target_language: Language::try_from(row.target_language.as_str())
            .map_err(TranslationJobRepositoryError::persistence)?,
        source_text: row.source_text,
        translated_text: row.translated_text,
        status: TranslationStatus::try_from(row.status.as_str())
            .map_err(TranslationJobRepositoryError::persistence)?,
        quality_score: score_from(row.quality_score)?,
        error_message: row.error_message,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(TranslationJob::from_persisted(data))
}
