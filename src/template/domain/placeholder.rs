//! `{name}` placeholder extraction and strict substitution.

use super::TemplateError;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Values supplied for template placeholders, keyed by variable name.
pub type VariableValues = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(placeholder_pattern);

#[expect(clippy::expect_used, reason = "the pattern is a literal checked by tests")]
fn placeholder_pattern() -> Regex {
    Regex::new(r"\{([^}]+)\}").expect("placeholder pattern compiles")
}

/// Returns the distinct placeholder names in `template`.
#[must_use]
pub fn extract_variables(template: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_owned())
        .collect()
}

/// Substitutes every placeholder in `template` with its value.
///
/// # Errors
///
/// Returns [`TemplateError::MissingVariable`] naming the first placeholder,
/// in template order, that has no value. Nothing is rendered in that case.
pub fn render(template: &str, values: &VariableValues) -> Result<String, TemplateError> {
    let missing = PLACEHOLDER
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .find(|name| !values.contains_key(name.as_str()));
    if let Some(name) = missing {
        return Err(TemplateError::MissingVariable(name.as_str().to_owned()));
    }
    let rendered = PLACEHOLDER.replace_all(template, |captures: &Captures<'_>| {
        captures
            .get(1)
            .and_then(|name| values.get(name.as_str()))
            .cloned()
            .unwrap_or_default()
    });
    Ok(rendered.into_owned())
}
