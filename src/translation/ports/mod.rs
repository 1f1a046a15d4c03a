//! Port contracts for translation job lookup.

mod repository;

pub use repository::{
    TranslationJobRepository, TranslationJobRepositoryError, TranslationJobRepositoryResult,
};
