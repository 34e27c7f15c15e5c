//! Keyword classifier assigning each video to exactly one category bucket.

use crate::domain::{CategoryBucket, RuleSet, VideoRecord, CATCH_ALL};

/// Classify records into one bucket per rule plus a trailing catch-all.
///
/// Rules are scanned in precedence order and keywords in list order; the match
/// test is case-insensitive substring containment of the keyword in the title.
/// The first matching keyword assigns the record and ends the scan for it
/// (first-match-wins, not best-match). Records no rule matches land in the
/// [`CATCH_ALL`] bucket. Every bucket exists in the output even when empty,
/// and in-bucket order preserves input order.
pub fn classify(records: &[VideoRecord], rules: &RuleSet) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = rules
        .names()
        .map(CategoryBucket::empty)
        .chain(std::iter::once(CategoryBucket::empty(CATCH_ALL)))
        .collect();
    let catch_all = buckets.len() - 1;

    for record in records {
        let title = record.title.to_lowercase();

        let slot = rules
            .rules()
            .iter()
            .position(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| title.contains(&keyword.to_lowercase()))
            })
            .unwrap_or(catch_all);

        buckets[slot].videos.push(record.clone());
    }

    buckets
}
