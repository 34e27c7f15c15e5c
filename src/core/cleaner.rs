//! Bulk deletion of playlists whose titles match configured categories.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::adapters::{ApiError, PlaylistApi};

/// Tuning for the cleanup polling loop
#[derive(Debug, Clone, Copy)]
pub struct CleanupOptions {
    /// Sleep between passes
    pub pass_interval: Duration,

    /// Upper bound on passes before giving up
    pub max_passes: u32,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            pass_interval: Duration::from_secs(60),
            max_passes: 10,
        }
    }
}

/// One list-and-delete sweep.
///
/// Lists the account's playlists and deletes every one whose title contains
/// any of `names` as a case-sensitive substring (the classifier matches
/// case-insensitively; the asymmetry is inherited and deliberate). Returns
/// whether anything was deleted this pass.
pub async fn delete_matching<A>(api: &A, names: &[String]) -> Result<bool, ApiError>
where
    A: PlaylistApi + ?Sized,
{
    let playlists = api.list_playlists().await?;

    let mut deleted = false;
    for playlist in &playlists {
        let title = &playlist.snippet.title;
        if let Some(name) = names.iter().find(|n| title.contains(n.as_str())) {
            info!(%title, playlist_id = %playlist.id, category = %name, "Deleting playlist");
            api.delete_playlist(&playlist.id).await?;
            deleted = true;
        }
    }

    Ok(deleted)
}

/// Repeat [`delete_matching`] passes until one deletes nothing.
///
/// Sleeps `pass_interval` between passes so accumulated quota usage can
/// clear. Quota errors are retried on the next pass; any other API error is
/// fatal and returned immediately. The loop stops after `max_passes` even if
/// the last pass still found matches. Returns the number of passes run.
#[instrument(skip(api, names), fields(max_passes = opts.max_passes))]
pub async fn run_cleanup<A>(
    api: &A,
    names: &[String],
    opts: CleanupOptions,
) -> Result<u32, ApiError>
where
    A: PlaylistApi + ?Sized,
{
    let mut passes = 0u32;

    loop {
        passes += 1;

        match delete_matching(api, names).await {
            Ok(false) => {
                info!(passes, "No matching playlists left");
                return Ok(passes);
            }
            Ok(true) => {
                info!(passes, "Pass deleted playlists, waiting before the next sweep");
            }
            Err(e) if e.is_retryable() => {
                warn!(passes, error = %e, "Rate limited, backing off");
            }
            Err(e) => return Err(e),
        }

        if passes >= opts.max_passes {
            warn!(passes, "Stopping: maximum cleanup passes reached");
            return Ok(passes);
        }

        tokio::time::sleep(opts.pass_interval).await;
    }
}
