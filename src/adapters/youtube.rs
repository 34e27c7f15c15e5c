//! YouTube Data API v3 client for the playlist surface tubecat consumes.
//!
//! Hand-built REST adapter: list/create/delete playlists and insert playlist
//! items, all under the authenticated account.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult, PlaylistApi};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Error reasons Google reports for quota and rate-limit conditions
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "dailyLimitExceeded",
];

/// YouTube Data API client
pub struct YouTubeClient {
    /// API root, overridable for tests
    base_url: String,
    /// OAuth2 bearer token
    access_token: String,
    /// HTTP client
    client: reqwest::Client,
}

/// A playlist resource (only the fields tubecat reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PlaylistStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: String,
}

/// Response envelope for playlists.list
#[derive(Debug, Deserialize)]
struct PlaylistListResponse {
    #[serde(default)]
    items: Vec<Playlist>,
}

/// Google's standard error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

impl YouTubeClient {
    /// Create a client against the production API
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Create a client against a custom API root
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a resource URL
    fn api_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Map a non-success response to an [`ApiError`]
    async fn failure(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            let quota = status == 429
                || envelope
                    .error
                    .errors
                    .iter()
                    .any(|e| QUOTA_REASONS.contains(&e.reason.as_str()));
            if quota {
                return ApiError::QuotaExceeded {
                    message: envelope.error.message,
                };
            }
            return ApiError::Api {
                status,
                message: envelope.error.message,
            };
        }

        if status == 429 {
            return ApiError::QuotaExceeded { message: body };
        }
        ApiError::Api {
            status,
            message: body,
        }
    }
}

#[async_trait]
impl PlaylistApi for YouTubeClient {
    /// List the account's playlists.
    ///
    /// Fetches a single page of up to 50 results; accounts with more
    /// playlists need repeated cleanup passes to see the rest.
    async fn list_playlists(&self) -> ApiResult<Vec<Playlist>> {
        let response = self
            .client
            .get(self.api_url("playlists"))
            .query(&[
                ("part", "id,snippet"),
                ("mine", "true"),
                ("maxResults", "50"),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: PlaylistListResponse = response.json().await?;
        Ok(body.items)
    }

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: &str,
    ) -> ApiResult<Playlist> {
        let response = self
            .client
            .post(self.api_url("playlists"))
            .query(&[("part", "snippet,status")])
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "snippet": {
                    "title": title,
                    "description": description,
                },
                "status": {
                    "privacyStatus": privacy,
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response.json().await?)
    }

    async fn delete_playlist(&self, playlist_id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.api_url("playlists"))
            .query(&[("id", playlist_id)])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Ok(())
    }

    async fn insert_video(&self, playlist_id: &str, video_id: &str) -> ApiResult<()> {
        let response = self
            .client
            .post(self.api_url("playlistItems"))
            .query(&[("part", "snippet")])
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "snippet": {
                    "playlistId": playlist_id,
                    "resourceId": {
                        "kind": "youtube#video",
                        "videoId": video_id,
                    },
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Ok(())
    }
}
