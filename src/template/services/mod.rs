//! Application services for template management and rendering.

mod templates;

pub use templates::{
    SUGGESTION_LIMIT, TemplateService, TemplateServiceError, TemplateServiceResult,
};
