//! Capability-specific prompt construction.

use crate::gateway::domain::{EnhancementKind, GatewayError, TextRequest};
use crate::language::Language;
use minijinja::{Environment, context};
use serde::Serialize;

const TRANSLATION_PROMPT: &str = "Translate the following text from {{ source }} to {{ target }}.
Provide ONLY the translation, no explanations.

Text to translate:
{{ text }}

Translation:";

const ENHANCEMENT_PROMPT: &str = "{{ instruction }}

{{ text }}

Enhanced version:";

const TRANSLATION_SYSTEM: &str = "You are a professional translator.";
const ENHANCEMENT_SYSTEM: &str = "You are an expert editor and content strategist.";
const TRANSLATION_TEMPERATURE: f32 = 0.3;
const ENHANCEMENT_TEMPERATURE: f32 = 0.5;
const DEFAULT_TONE: &str = "professional and friendly";

/// Renders a `minijinja` prompt template with `context`.
///
/// # Errors
///
/// Returns [`GatewayError::Prompt`] when the template is malformed.
pub fn render_prompt<S: Serialize>(template: &str, context: S) -> Result<String, GatewayError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| GatewayError::Prompt(error.to_string()))
}

/// Builds the low-temperature translation request.
///
/// # Errors
///
/// Returns [`GatewayError::Prompt`] when the prompt cannot be rendered.
pub fn translation_request(
    text: &str,
    source: Language,
    target: Language,
) -> Result<TextRequest, GatewayError> {
    let prompt = render_prompt(
        TRANSLATION_PROMPT,
        context! {
            source => source.display_name(),
            target => target.display_name(),
            text => text,
        },
    )?;
    Ok(TextRequest::new(prompt)
        .with_temperature(TRANSLATION_TEMPERATURE)
        .with_system_message(TRANSLATION_SYSTEM))
}

/// Builds the editing request for `kind`.
///
/// # Errors
///
/// Returns [`GatewayError::Prompt`] when the prompt cannot be rendered.
pub fn enhancement_request(
    text: &str,
    kind: EnhancementKind,
    context: Option<&str>,
) -> Result<TextRequest, GatewayError> {
    let prompt = render_prompt(
        ENHANCEMENT_PROMPT,
        context! {
            instruction => instruction(kind, context),
            text => text,
        },
    )?;
    Ok(TextRequest::new(prompt)
        .with_temperature(ENHANCEMENT_TEMPERATURE)
        .with_system_message(ENHANCEMENT_SYSTEM))
}

fn instruction(kind: EnhancementKind, context: Option<&str>) -> String {
    match kind {
        EnhancementKind::Grammar => "Fix all grammar, spelling, and punctuation errors in the following text. Keep the same tone and style:".to_owned(),
        EnhancementKind::Tone => format!(
            "Adjust the tone of the following text to be {}:",
            context.unwrap_or(DEFAULT_TONE)
        ),
        EnhancementKind::Seo => context.map_or_else(
            || "Optimize the following text for SEO. Add relevant keywords naturally and improve readability:".to_owned(),
            |keywords| format!(
                "Optimize the following text for SEO using these keywords: {keywords}. Add them naturally and improve readability:"
            ),
        ),
        EnhancementKind::Summarize => context.map_or_else(
            || "Provide a concise summary of the following text:".to_owned(),
            |limit| format!("Provide a concise summary of the following text ({limit}):"),
        ),
        EnhancementKind::Improve => "Improve the following text by making it clearer, more engaging, and more impactful:".to_owned(),
    }
}
