//! Category buckets: the ordered output of classification.

use serde::{Deserialize, Serialize};

use super::video::VideoRecord;

/// Name of the catch-all bucket for records no rule matched
pub const CATCH_ALL: &str = "Other";

/// The records assigned to one category, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    /// Category name ([`CATCH_ALL`] for the trailing catch-all bucket)
    pub category: String,

    /// Matching records, preserving their relative input order
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

impl CategoryBucket {
    /// Create an empty bucket for a category
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            videos: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
