//! Diesel row models for template persistence.

use super::schema::content_templates;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row model for template reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = content_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateRow {
    /// Internal template identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Content type.
    pub template_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Prompt text.
    pub prompt_template: String,
    /// Derived placeholder names.
    pub variables: Value,
    /// Language code.
    pub language: String,
    /// Target platform.
    pub platform: Option<String>,
    /// Activation flag.
    pub is_active: bool,
    /// Usage counter.
    pub usage_count: i64,
    /// Creating actor.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Editable template columns; the usage counter is only ever incremented.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = content_templates)]
#[diesel(treat_none_as_null = true)]
pub struct TemplateChangeset {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Prompt text.
    pub prompt_template: String,
    /// Derived placeholder names.
    pub variables: Value,
    /// Target platform.
    pub platform: Option<String>,
    /// Activation flag.
    pub is_active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
