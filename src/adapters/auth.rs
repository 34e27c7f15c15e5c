//! OAuth2 installed-app flow for the YouTube Data API.
//!
//! Reads the standard Google client-secret JSON, caches tokens in a local
//! file, refreshes them when possible, and falls back to the interactive
//! authorization-code exchange (print URL, read code from stdin) otherwise.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Scope covering playlist creation and deletion
const SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// Out-of-band redirect for installed apps without a local listener
const OOB_REDIRECT: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Tokens are refreshed this long before their nominal expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Google client-secret file (`credentials.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub installed: InstalledApp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstalledApp {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl Credentials {
    /// Parse a client-secret file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read client secret file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse client secret file: {}", path.display()))
    }
}

/// A cached token as persisted to the token file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expiry: DateTime<Utc>,
}

impl StoredToken {
    /// Whether the token is past (or within a minute of) its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expiry
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

impl TokenResponse {
    /// Convert to a cacheable token, keeping an existing refresh token when
    /// the endpoint omits one (refresh responses usually do)
    fn into_stored(self, previous_refresh: Option<String>) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry: Utc::now() + Duration::seconds(self.expires_in),
        }
    }
}

/// OAuth2 authenticator with a file-backed token cache
pub struct Authenticator {
    credentials: Credentials,
    token_path: PathBuf,
    client: reqwest::Client,
}

impl Authenticator {
    /// Create an authenticator from parsed credentials
    pub fn new(credentials: Credentials, token_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials,
            token_path: token_path.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create an authenticator from a client-secret file path
    pub fn from_files(credentials_path: &Path, token_path: &Path) -> Result<Self> {
        Ok(Self::new(Credentials::from_file(credentials_path)?, token_path))
    }

    /// The redirect URI to use for the code exchange
    fn redirect_uri(&self) -> &str {
        self.credentials
            .installed
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT)
    }

    /// The authorization URL the user must visit
    pub fn auth_url(&self) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &self.credentials.installed.auth_uri,
            &[
                ("client_id", self.credentials.installed.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("access_type", "offline"),
            ],
        )
        .context("Invalid auth_uri in client secret file")?;
        Ok(url.into())
    }

    /// Return a valid access token, going through the cache, a refresh, or
    /// the interactive flow as needed. Persists any newly obtained token.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.load_cached() {
            if !cached.is_expired() {
                return Ok(cached.access_token);
            }

            if let Some(refresh) = cached.refresh_token.clone() {
                match self.refresh(&refresh).await {
                    Ok(token) => {
                        self.save(&token)?;
                        return Ok(token.access_token);
                    }
                    Err(e) => {
                        warn!(error = %e, "Token refresh failed, re-authorizing");
                    }
                }
            }
        }

        let token = self.authorize_interactive().await?;
        self.save(&token)?;
        Ok(token.access_token)
    }

    /// Load the cached token; a missing or unreadable cache just means the
    /// flow starts over
    fn load_cached(&self) -> Option<StoredToken> {
        let raw = std::fs::read_to_string(&self.token_path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(
                    path = %self.token_path.display(),
                    error = %e,
                    "Ignoring malformed token cache"
                );
                None
            }
        }
    }

    /// Persist a token to the cache file
    fn save(&self, token: &StoredToken) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create token directory: {}", parent.display())
            })?;
        }
        let raw = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.token_path, raw)
            .with_context(|| format!("Failed to write token file: {}", self.token_path.display()))?;
        info!(path = %self.token_path.display(), "Saved token");
        Ok(())
    }

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken> {
        let response = self
            .client
            .post(&self.credentials.installed.token_uri)
            .form(&[
                ("client_id", self.credentials.installed.client_id.as_str()),
                ("client_secret", self.credentials.installed.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to reach token endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token refresh rejected ({}): {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token endpoint response")?;
        Ok(token.into_stored(Some(refresh_token.to_string())))
    }

    /// Run the interactive authorization-code flow
    async fn authorize_interactive(&self) -> Result<StoredToken> {
        let url = self.auth_url()?;
        eprintln!("Go to the following link in your browser then type the authorization code:");
        eprintln!("{}", url);
        eprint!("Code: ");
        io::stderr().flush().ok();

        let mut code = String::new();
        io::stdin()
            .lock()
            .read_line(&mut code)
            .context("Failed to read authorization code from stdin")?;
        let code = code.trim();
        if code.is_empty() {
            anyhow::bail!("No authorization code provided");
        }

        let response = self
            .client
            .post(&self.credentials.installed.token_uri)
            .form(&[
                ("client_id", self.credentials.installed.client_id.as_str()),
                ("client_secret", self.credentials.installed.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .context("Failed to reach token endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Authorization code exchange failed ({}): {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token endpoint response")?;
        Ok(token.into_stored(None))
    }
}
