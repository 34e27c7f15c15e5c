//! Playlist creation and population from classified buckets.

use tracing::{debug, info, instrument, warn};

use crate::adapters::{ApiError, PlaylistApi};
use crate::domain::{CategoryBucket, RuleSet};

/// Privacy status applied to every created playlist
const PLAYLIST_PRIVACY: &str = "private";

/// Counters from a publish run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Playlists created (one per configured category)
    pub playlists_created: usize,

    /// Playlist items inserted
    pub items_inserted: usize,

    /// Videos skipped because no id could be extracted from their link
    pub items_skipped: usize,
}

/// Create one playlist per configured category and insert its bucket's videos.
///
/// Categories are processed in rule order so playlist creation order is
/// deterministic, and videos within a category keep their bucket order. The
/// catch-all bucket is not published. Any API failure aborts the whole run
/// immediately; playlists and items created before the failure are left in
/// place (re-running creates duplicates, there is no existence check).
#[instrument(skip_all, fields(categories = rules.len()))]
pub async fn publish<A>(
    api: &A,
    rules: &RuleSet,
    buckets: &[CategoryBucket],
) -> Result<PublishReport, ApiError>
where
    A: PlaylistApi + ?Sized,
{
    let mut report = PublishReport::default();

    for rule in rules.rules() {
        let playlist = api
            .create_playlist(
                &format!("{} Playlist", rule.name),
                &format!("A playlist of {} videos", rule.name),
                PLAYLIST_PRIVACY,
            )
            .await?;
        report.playlists_created += 1;
        info!(category = %rule.name, playlist_id = %playlist.id, "Created playlist");

        let Some(bucket) = buckets.iter().find(|b| b.category == rule.name) else {
            continue;
        };

        for video in &bucket.videos {
            match video.video_id() {
                Some(video_id) => {
                    api.insert_video(&playlist.id, video_id).await?;
                    report.items_inserted += 1;
                    debug!(title = %video.title, %video_id, "Added video to playlist");
                }
                None => {
                    report.items_skipped += 1;
                    warn!(
                        title = %video.title,
                        link = %video.link,
                        "No video id in link, skipping"
                    );
                }
            }
        }
    }

    Ok(report)
}
