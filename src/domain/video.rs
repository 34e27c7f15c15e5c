//! Scraped video records and video-id extraction.
//!
//! Records are parsed from the scrape JSON and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A single scraped video entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Video title as scraped
    pub title: String,

    /// Watch URL
    pub link: String,

    /// Accessibility label from the scrape
    #[serde(rename = "ariaLabel")]
    pub aria_label: String,
}

impl VideoRecord {
    /// Create a record (mostly useful in tests)
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        aria_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            aria_label: aria_label.into(),
        }
    }

    /// YouTube video id extracted from the link, if present
    pub fn video_id(&self) -> Option<&str> {
        extract_video_id(&self.link)
    }
}

/// Extract a YouTube video id from a watch link.
///
/// Takes everything after the first `v=` up to the next `&`. This is not a
/// general URL parser; it only understands the one link shape produced by the
/// scraper (`...?v=<id>&<rest>`).
pub fn extract_video_id(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once("v=")?;
    let id = rest.split_once('&').map_or(rest, |(id, _)| id);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
