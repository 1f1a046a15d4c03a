//! Offset pagination shared by list operations.

use serde::{Deserialize, Serialize};

/// Skip/limit window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Number of records to skip.
    pub skip: usize,
    /// Maximum number of records to return.
    pub limit: usize,
}

impl Page {
    /// Default number of records returned by list operations.
    pub const DEFAULT_LIMIT: usize = 100;

    /// Creates a page window.
    #[must_use]
    pub const fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Applies the window to an already ordered iterator.
    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
