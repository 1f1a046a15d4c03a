//! Content template entity.

use super::{TemplateError, TemplateId, VariableValues, extract_variables, render};
use crate::actor::ActorId;
use crate::content::domain::ContentType;
use crate::language::Language;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MAX_NAME_LENGTH: usize = 255;

/// Parameter object for creating a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    /// Display name.
    pub name: String,
    /// Content type the template produces.
    pub template_type: ContentType,
    /// Optional description.
    pub description: Option<String>,
    /// Prompt text containing `{name}` placeholders.
    pub prompt_template: String,
    /// Template language.
    pub language: Language,
    /// Target platform, if any.
    pub platform: Option<String>,
    /// Creating actor.
    pub created_by: ActorId,
}

impl NewTemplate {
    /// Creates a request for an English template with no description or
    /// platform.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        template_type: ContentType,
        prompt_template: impl Into<String>,
        created_by: ActorId,
    ) -> Self {
        Self {
            name: name.into(),
            template_type,
            description: None,
            prompt_template: prompt_template.into(),
            language: Language::default(),
            platform: None,
            created_by,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the template language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the target platform.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Field-level update applied to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement prompt text; re-derives the variable set.
    pub prompt_template: Option<String>,
    /// Replacement platform.
    pub platform: Option<String>,
    /// Replacement activation flag.
    pub is_active: Option<bool>,
}

impl TemplatePatch {
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

    /// Sets the replacement prompt text.
    #[must_use]
    pub fn with_prompt_template(mut self, prompt_template: impl Into<String>) -> Self {
        self.prompt_template = Some(prompt_template.into());
        self
    }

    /// Sets the replacement platform.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the replacement activation flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Reusable prompt skeleton.
///
/// `variables` is derived from `prompt_template` and has no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTemplate {
    id: TemplateId,
    name: String,
    template_type: ContentType,
    description: Option<String>,
    prompt_template: String,
    variables: BTreeSet<String>,
    language: Language,
    platform: Option<String>,
    is_active: bool,
    usage_count: u64,
    created_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted template.
///
/// The variable set is recomputed from `prompt_template` on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTemplateData {
    /// Persisted identifier.
    pub id: TemplateId,
    /// Persisted name.
    pub name: String,
    /// Persisted content type.
    pub template_type: ContentType,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted prompt text.
    pub prompt_template: String,
    /// Persisted language.
    pub language: Language,
    /// Persisted platform.
    pub platform: Option<String>,
    /// Persisted activation flag.
    pub is_active: bool,
    /// Persisted usage counter.
    pub usage_count: u64,
    /// Persisted creator.
    pub created_by: ActorId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ContentTemplate {
    /// Creates an active template with a zero usage count.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the name or prompt text is invalid.
    pub fn new(request: NewTemplate, clock: &impl Clock) -> Result<Self, TemplateError> {
        let name = validate_name(&request.name)?;
        validate_prompt(&request.prompt_template)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TemplateId::new(),
            name,
            template_type: request.template_type,
            description: request.description,
            variables: extract_variables(&request.prompt_template),
            prompt_template: request.prompt_template,
            language: request.language,
            platform: request.platform,
            is_active: true,
            usage_count: 0,
            created_by: request.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a template from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTemplateData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            template_type: data.template_type,
            description: data.description,
            variables: extract_variables(&data.prompt_template),
            prompt_template: data.prompt_template,
            language: data.language,
            platform: data.platform,
            is_active: data.is_active,
            usage_count: data.usage_count,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content type the template produces.
    #[must_use]
    pub const fn template_type(&self) -> ContentType {
        self.template_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Returns the placeholder names found in the prompt text.
    #[must_use]
    pub const fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Returns the template language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Returns the target platform, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns whether the template may be used.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns how many times the template has been used.
    #[must_use]
    pub const fn usage_count(&self) -> u64 {
        self.usage_count
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

    /// Applies an update, re-deriving variables when the prompt changes.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when a replacement name or prompt is
    /// invalid; the template is left unchanged.
    pub fn apply(&mut self, patch: TemplatePatch, clock: &impl Clock) -> Result<(), TemplateError> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        if let Some(prompt) = patch.prompt_template.as_deref() {
            validate_prompt(prompt)?;
        }
        if let Some(text) = name {
            self.name = text;
        }
        if let Some(prompt) = patch.prompt_template {
            self.variables = extract_variables(&prompt);
            self.prompt_template = prompt;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(platform) = patch.platform {
            self.platform = Some(platform);
        }
        if let Some(flag) = patch.is_active {
            self.is_active = flag;
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Counts one use of the template.
    pub const fn record_use(&mut self) {
        self.usage_count += 1;
    }

    /// Keeps the stored counter when an edited copy is written back.
    pub(crate) const fn keep_usage_count(&mut self, usage_count: u64) {
        self.usage_count = usage_count;
    }

    /// Renders the prompt text with `values`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] for the first placeholder
    /// without a value.
    pub fn render(&self, values: &VariableValues) -> Result<String, TemplateError> {
        render(&self.prompt_template, values)
    }
}

fn validate_name(name: &str) -> Result<String, TemplateError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TemplateError::EmptyName);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_NAME_LENGTH {
        return Err(TemplateError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}

fn validate_prompt(prompt: &str) -> Result<(), TemplateError> {
    if prompt.trim().is_empty() {
        return Err(TemplateError::EmptyPromptTemplate);
    }
    Ok(())
}
