//! Core orchestration logic.
//!
//! This module contains:
//! - classifier: keyword classification into category buckets
//! - publisher: playlist creation and population
//! - cleaner: bulk playlist deletion with bounded polling

pub mod classifier;
pub mod cleaner;
pub mod publisher;

// Re-export commonly used items
pub use classifier::classify;
pub use cleaner::{delete_matching, run_cleanup, CleanupOptions};
pub use publisher::{publish, PublishReport};
