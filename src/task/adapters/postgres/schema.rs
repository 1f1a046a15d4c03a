//! Diesel schema for task and result entity persistence.

diesel::table! {
    /// One AI operation invocation.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Operation kind.
        #[max_length = 50]
        task_type -> Varchar,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Operation input payload.
        input_data -> Jsonb,
        /// Operation output payload, set on completion.
        output_data -> Nullable<Jsonb>,
        /// Prompt sent to the provider.
        prompt -> Text,
        /// Model that served the call.
        #[max_length = 100]
        model_used -> Nullable<Varchar>,
        /// Tokens consumed.
        tokens_used -> Int4,
        /// Provider call duration in seconds.
        processing_time -> Float8,
        /// Failure or rejection message.
        error_message -> Nullable<Text>,
        /// Whether the output needs review.
        requires_approval -> Bool,
        /// Whether the task was approved.
        approved -> Bool,
        /// Approving actor.
        #[max_length = 255]
        approved_by -> Nullable<Varchar>,
        /// Approval timestamp.
        approved_at -> Nullable<Timestamptz>,
        /// Initiating actor.
        #[max_length = 255]
        created_by -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Generated artifacts owned by completed tasks.
    generated_content (id) {
        /// Internal content identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Content kind.
        #[max_length = 50]
        content_type -> Varchar,
        /// Optional title.
        title -> Nullable<Text>,
        /// Body text.
        body -> Text,
        /// Language code.
        #[max_length = 10]
        language -> Varchar,
        /// Target platform.
        #[max_length = 50]
        platform -> Nullable<Varchar>,
        /// Free-form metadata.
        metadata -> Jsonb,
        /// Quality score in `0..=1`.
        quality_score -> Nullable<Float8>,
        /// Publication flag.
        published -> Bool,
        /// Publication timestamp.
        published_at -> Nullable<Timestamptz>,
        /// Downstream publishing identifier.
        #[max_length = 255]
        external_id -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Translation units owned by completed tasks.
    translation_jobs (id) {
        /// Internal job identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Source language code.
        #[max_length = 10]
        source_language -> Varchar,
        /// Target language code.
        #[max_length = 10]
        target_language -> Varchar,
        /// Text to translate.
        source_text -> Text,
        /// Translated text, set on completion.
        translated_text -> Nullable<Text>,
        /// Job status.
        #[max_length = 50]
        status -> Varchar,
        /// Quality score in `0..=1`.
        quality_score -> Nullable<Float8>,
        /// Failure message.
        error_message -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(generated_content -> tasks (task_id));
diesel::joinable!(translation_jobs -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, generated_content, translation_jobs);
