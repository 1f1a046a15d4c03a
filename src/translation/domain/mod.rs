//! Domain model for translation jobs.

mod error;
mod ids;
mod job;

pub use error::{ParseTranslationStatusError, TranslationDomainError};
pub use ids::TranslationJobId;
pub use job::{NewTranslationJob, PersistedTranslationJobData, TranslationJob, TranslationStatus};
