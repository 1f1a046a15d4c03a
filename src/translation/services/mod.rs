//! Application services for translation.

mod translation;

pub use translation::{
    AutoTranslationReport, TranslationItem, TranslationItemResult, TranslationService,
};
