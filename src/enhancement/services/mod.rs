//! Application services for text enhancement.

mod enhancement;

pub use enhancement::{EnhancementItem, EnhancementItemResult, EnhancementService};
