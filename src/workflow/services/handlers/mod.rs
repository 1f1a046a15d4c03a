//! Built-in workflow handlers.

mod auto_translate;
mod scheduled_post;

pub use auto_translate::AutoTranslateHandler;
pub use scheduled_post::ScheduledPostHandler;
