//! Adapter interfaces for external systems.
//!
//! Adapters wrap the remote YouTube Data API and the OAuth2 token flow behind
//! a small trait so orchestration code can run against an in-memory fake.

pub mod auth;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the concrete client and its wire models
pub use auth::{Authenticator, Credentials, StoredToken};
pub use youtube::{Playlist, PlaylistSnippet, PlaylistStatus, YouTubeClient};

/// Failures talking to the remote API.
///
/// Quota/rate-limit responses get their own variant so callers can retry them
/// while treating everything else as fatal.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// Whether a caller may reasonably retry after backing off
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The playlist surface the orchestrators consume
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    /// List the authenticated account's playlists (single page)
    async fn list_playlists(&self) -> ApiResult<Vec<Playlist>>;

    /// Create a playlist and return it with its server-assigned id
    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: &str,
    ) -> ApiResult<Playlist>;

    /// Delete a playlist by id
    async fn delete_playlist(&self, playlist_id: &str) -> ApiResult<()>;

    /// Append a video to a playlist
    async fn insert_video(&self, playlist_id: &str, video_id: &str) -> ApiResult<()>;
}
