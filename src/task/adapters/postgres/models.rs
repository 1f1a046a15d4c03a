//! Diesel row models for task and result entity persistence.

use super::schema::{generated_content, tasks, translation_jobs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row model for task records, used for reads, inserts, and updates.
///
/// Updates leave the approval columns alone; [`ApprovalChangeset`] writes
/// them.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Operation kind.
    pub task_type: String,
    /// Lifecycle status.
    pub status: String,
    /// Operation input payload.
    pub input_data: Value,
    /// Operation output payload.
    pub output_data: Option<Value>,
    /// Provider prompt.
    pub prompt: String,
    /// Model that served the call.
    pub model_used: Option<String>,
    /// Tokens consumed.
    pub tokens_used: i32,
    /// Provider call duration in seconds.
    pub processing_time: f64,
    /// Failure or rejection message.
    pub error_message: Option<String>,
    /// Whether the output needs review.
    pub requires_approval: bool,
    /// Whether the task was approved.
    #[diesel(skip_update)]
    pub approved: bool,
    /// Approving actor.
    #[diesel(skip_update)]
    pub approved_by: Option<String>,
    /// Approval timestamp.
    #[diesel(skip_update)]
    pub approved_at: Option<DateTime<Utc>>,
    /// Initiating actor.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Approval columns of a task record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApprovalChangeset {
    /// Always `true`; approval is never withdrawn.
    pub approved: bool,
    /// Approving actor.
    pub approved_by: String,
    /// Approval timestamp.
    pub approved_at: DateTime<Utc>,
}

/// Row model for generated content records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = generated_content)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ContentRow {
    /// Internal content identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Content kind.
    pub content_type: String,
    /// Optional title.
    pub title: Option<String>,
    /// Body text.
    pub body: String,
    /// Language code.
    pub language: String,
    /// Target platform.
    pub platform: Option<String>,
    /// Free-form metadata.
    pub metadata: Value,
    /// Quality score.
    pub quality_score: Option<f64>,
    /// Publication flag.
    pub published: bool,
    /// Publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Downstream publishing identifier.
    pub external_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for translation job records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = translation_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TranslationJobRow {
    /// Internal job identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Source language code.
    pub source_language: String,
    /// Target language code.
    pub target_language: String,
    /// Text to translate.
    pub source_text: String,
    /// Translated text.
    pub translated_text: Option<String>,
    /// Job status.
    pub status: String,
    /// Quality score.
    pub quality_score: Option<f64>,
    /// Failure message.
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
