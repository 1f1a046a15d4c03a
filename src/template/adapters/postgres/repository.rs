//! `PostgreSQL` repository implementation for content templates.

use super::{
    models::{TemplateChangeset, TemplateRow},
    schema::content_templates,
};
use crate::actor::ActorId;
use crate::content::domain::ContentType;
use crate::database::{PersistenceFailure, PgPool, page_bounds, run_blocking};
use crate::language::Language;
use crate::paging::Page;
use crate::template::{
    domain::{ContentTemplate, PersistedTemplateData, TemplateId},
    ports::{TemplateFilter, TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed template repository.
#[derive(Debug, Clone)]
pub struct PostgresTemplateRepository {
    pool: PgPool,
}

impl PostgresTemplateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PersistenceFailure for TemplateRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn store(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()> {
        let template_id = template.id();
        let row = to_template_row(template)?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(content_templates::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TemplateRepositoryError::DuplicateTemplate(template_id)
                    }
                    _ => TemplateRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, template: &ContentTemplate) -> TemplateRepositoryResult<()> {
        let template_id = template.id();
        let changes = TemplateChangeset {
            name: template.name().to_owned(),
            description: template.description().map(str::to_owned),
            prompt_template: template.prompt_template().to_owned(),
            variables: variables_value(template),
            platform: template.platform().map(str::to_owned),
            is_active: template.is_active(),
            updated_at: template.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(content_templates::table.find(template_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(TemplateRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TemplateRepositoryError::NotFound(template_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TemplateId,
    ) -> TemplateRepositoryResult<Option<ContentTemplate>> {
        run_blocking(&self.pool, move |connection| {
            let row = content_templates::table
                .find(id.into_inner())
                .select(TemplateRow::as_select())
                .first::<TemplateRow>(connection)
                .optional()
                .map_err(TemplateRepositoryError::persistence)?;
            row.map(row_to_template).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &TemplateFilter,
        page: Page,
    ) -> TemplateRepositoryResult<Vec<ContentTemplate>> {
        let criteria = filter.clone();
        let (offset, limit) = page_bounds(page)?;
        run_blocking(&self.pool, move |connection| {
            let mut query = content_templates::table
                .select(TemplateRow::as_select())
                .into_boxed();
            if let Some(template_type) = criteria.template_type {
                query = query.filter(content_templates::template_type.eq(template_type.as_str()));
            }
            if let Some(language) = criteria.language {
                query = query.filter(content_templates::language.eq(language.as_str()));
            }
            if let Some(platform) = criteria.platform {
                query = query.filter(content_templates::platform.eq(platform));
            }
            if let Some(is_active) = criteria.is_active {
                query = query.filter(content_templates::is_active.eq(is_active));
            }
            let rows = query
                .order((
                    content_templates::usage_count.desc(),
                    content_templates::created_at.desc(),
                    content_templates::id.desc(),
                ))
                .offset(offset)
                .limit(limit)
                .load::<TemplateRow>(connection)
                .map_err(TemplateRepositoryError::persistence)?;
            rows.into_iter().map(row_to_template).collect()
        })
        .await
    }

    async fn delete(&self, id: TemplateId) -> TemplateRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(content_templates::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TemplateRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn increment_usage(&self, id: TemplateId) -> TemplateRepositoryResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let count = diesel::update(content_templates::table.find(id.into_inner()))
                .set(content_templates::usage_count.eq(content_templates::usage_count + 1))
                .returning(content_templates::usage_count)
                .get_result::<i64>(connection)
                .optional()
                .map_err(TemplateRepositoryError::persistence)?
                .ok_or(TemplateRepositoryError::NotFound(id))?;
            u64::try_from(count).map_err(TemplateRepositoryError::persistence)
        })
        .await
    }
}

fn variables_value(template: &ContentTemplate) -> Value {
    Value::Array(
        template
            .variables()
            .iter()
            .cloned()
            .map(Value::String)
            .collect(),
    )
}

fn to_template_row(template: &ContentTemplate) -> TemplateRepositoryResult<TemplateRow> {
    let usage_count =
        i64::try_from(template.usage_count()).map_err(TemplateRepositoryError::persistence)?;
    Ok(TemplateRow {
        id: template.id().into_inner(),
        name: template.name().to_owned(),
        template_type: template.template_type().as_str().to_owned(),
        description: template.description().map(str::to_owned),
        prompt_template: template.prompt_template().to_owned(),
        variables: variables_value(template),
        language: template.language().as_str().to_owned(),
        platform: template.platform().map(str::to_owned),
        is_active: template.is_active(),
        usage_count,
        created_by: template.created_by().as_str().to_owned(),
        created_at: template.created_at(),
        updated_at: template.updated_at(),
    })
}

fn row_to_template(row: TemplateRow) -> TemplateRepositoryResult<ContentTemplate> {
    let data = PersistedTemplateData {
        id: TemplateId::from_uuid(row.id),
        name: row.name,
        template_type: ContentType::try_from(row.template_type.as_str())
            .map_err(TemplateRepositoryError::persistence)?,
        description: row.description,
        prompt_template: row.prompt_template,
        language: Language::try_from(row.language.as_str())
            .map_err(TemplateRepositoryError::persistence)?,
        platform: row.platform,
        is_active: row.is_active,
        usage_count: u64::try_from(row.usage_count)
            .map_err(TemplateRepositoryError::persistence)?,
        created_by: ActorId::new(row.created_by).map_err(TemplateRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(ContentTemplate::from_persisted(data))
}
