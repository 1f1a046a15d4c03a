//! Diesel schema for template persistence.

diesel::table! {
    /// Reusable prompt skeletons.
    content_templates (id) {
        /// Internal template identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Content type produced by the template.
        #[max_length = 50]
        template_type -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Prompt text with `{name}` placeholders.
        prompt_template -> Text,
        /// Derived placeholder names, stored for querying.
        variables -> Jsonb,
        /// Language code.
        #[max_length = 10]
        language -> Varchar,
        /// Target platform.
        #[max_length = 50]
        platform -> Nullable<Varchar>,
        /// Activation flag.
        is_active -> Bool,
        /// Number of recorded uses.
        usage_count -> Int8,
        /// Creating actor.
        #[max_length = 255]
        created_by -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
