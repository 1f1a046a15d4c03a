//! Domain model for content templates.

mod error;
mod ids;
mod placeholder;
mod template;

pub use error::TemplateError;
pub use ids::TemplateId;
pub use placeholder::{VariableValues, extract_variables, render};
pub use template::{ContentTemplate, NewTemplate, PersistedTemplateData, TemplatePatch};
