//! In-memory PlaylistApi fake shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tubecat::adapters::{
    ApiError, ApiResult, Playlist, PlaylistApi, PlaylistSnippet, PlaylistStatus,
};

/// Fake remote playlist store with programmable failures
#[derive(Default)]
pub struct FakeApi {
    /// Current remote playlist state
    pub playlists: Mutex<Vec<Playlist>>,
    /// (playlist_id, video_id) inserts in call order
    pub inserted: Mutex<Vec<(String, String)>>,
    /// Deleted playlist ids in call order
    pub deleted: Mutex<Vec<String>>,
    /// Fail the Nth insert call (0-based) with a non-retryable API error
    pub fail_insert_at: Option<usize>,
    /// Fail every list call with a non-retryable API error
    pub fail_list: bool,
    /// Number of list calls to fail with a quota error before succeeding
    pub quota_failures: AtomicUsize,
    /// When set, every deletion respawns a playlist with this title
    pub respawn_title: Option<String>,
    pub insert_calls: AtomicUsize,
    pub next_id: AtomicUsize,
}

/// Build a playlist resource for seeding the fake
pub fn playlist(id: &str, title: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        snippet: PlaylistSnippet {
            title: title.to_string(),
            description: String::new(),
        },
        status: None,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake with pre-seeded playlists titled as given
    pub fn with_playlists(titles: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut playlists = api.playlists.lock().unwrap();
            for (i, title) in titles.iter().enumerate() {
                playlists.push(playlist(&format!("seed-{}", i), title));
            }
        }
        api
    }

    fn fresh_id(&self) -> String {
        format!("PL{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl PlaylistApi for FakeApi {
    async fn list_playlists(&self) -> ApiResult<Vec<Playlist>> {
        if self.fail_list {
            return Err(ApiError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        if self.quota_failures.load(Ordering::SeqCst) > 0 {
            self.quota_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(ApiError::QuotaExceeded {
                message: "daily quota exhausted".to_string(),
            });
        }
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: &str,
    ) -> ApiResult<Playlist> {
        let created = Playlist {
            id: self.fresh_id(),
            snippet: PlaylistSnippet {
                title: title.to_string(),
                description: description.to_string(),
            },
            status: Some(PlaylistStatus {
                privacy_status: privacy.to_string(),
            }),
        };
        self.playlists.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_playlist(&self, playlist_id: &str) -> ApiResult<()> {
        let mut playlists = self.playlists.lock().unwrap();
        let before = playlists.len();
        playlists.retain(|p| p.id != playlist_id);
        if playlists.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: format!("playlist not found: {}", playlist_id),
            });
        }
        self.deleted.lock().unwrap().push(playlist_id.to_string());

        if let Some(ref title) = self.respawn_title {
            let id = format!("respawn-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            playlists.push(playlist(&id, title));
        }
        Ok(())
    }

    async fn insert_video(&self, playlist_id: &str, video_id: &str) -> ApiResult<()> {
        let call = self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert_at == Some(call) {
            return Err(ApiError::Api {
                status: 400,
                message: "invalid video id".to_string(),
            });
        }
        self.inserted
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), video_id.to_string()));
        Ok(())
    }
}
