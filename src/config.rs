//! Configuration for tubecat paths, rules, and cleanup tuning.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (TUBECAT_HOME, TUBECAT_CREDENTIALS, TUBECAT_TOKEN)
//! 2. Config file (.tubecat/config.yaml)
//! 3. Defaults (~/.tubecat with credentials.json and token.json inside)
//!
//! Config file discovery:
//! - Searches current directory and parents for .tubecat/config.yaml
//! - Paths in the config file are relative to the config file's directory
//!
//! The config file may also replace the built-in category rule table; the
//! table is validated at load time (duplicate names and empty keywords are
//! configuration errors, not classifier concerns).

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::{CategoryRule, RuleSet};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub categories: Option<Vec<CategoryRule>>,
    #[serde(default)]
    pub cleanup: Option<CleanupConfig>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to config file)
    pub home: Option<String>,
    /// OAuth2 client secret file
    pub credentials: Option<String>,
    /// Token cache file
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    pub pass_interval_secs: Option<u64>,
    pub max_passes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Override of the YouTube API root (mainly for testing)
    pub base_url: Option<String>,
}

/// Resolved configuration with absolute paths and a validated rule table
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the tubecat home (token cache lives here by default)
    pub home: PathBuf,
    /// OAuth2 client secret file
    pub credentials_file: PathBuf,
    /// Token cache file
    pub token_file: PathBuf,
    /// Ordered, validated category rules
    pub rules: RuleSet,
    /// Cleanup loop tuning
    pub cleanup: CleanupSettings,
    /// YouTube API root override, if any
    pub api_base_url: Option<String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct CleanupSettings {
    pub pass_interval_secs: u64,
    pub max_passes: u32,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            pass_interval_secs: 60,
            max_passes: 10,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".tubecat").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path_str)
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".tubecat");

    let config_file = find_config_file();
    let file = config_file
        .as_ref()
        .map(|path| load_config_file(path))
        .transpose()?;

    // Base for relative paths in the config file
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let paths = file.as_ref().map(|f| f.paths.clone()).unwrap_or_default();

    let home = if let Ok(env_home) = std::env::var("TUBECAT_HOME") {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = paths.home {
        resolve_path(&base_dir, home_path)
    } else {
        default_home
    };

    let credentials_file = if let Ok(env_creds) = std::env::var("TUBECAT_CREDENTIALS") {
        PathBuf::from(env_creds)
    } else if let Some(ref creds_path) = paths.credentials {
        resolve_path(&base_dir, creds_path)
    } else {
        home.join("credentials.json")
    };

    let token_file = if let Ok(env_token) = std::env::var("TUBECAT_TOKEN") {
        PathBuf::from(env_token)
    } else if let Some(ref token_path) = paths.token {
        resolve_path(&base_dir, token_path)
    } else {
        home.join("token.json")
    };

    let rules = match file.as_ref().and_then(|f| f.categories.clone()) {
        Some(categories) => RuleSet::new(categories).context("Invalid category table")?,
        None => RuleSet::default(),
    };

    let defaults = CleanupSettings::default();
    let cleanup = file
        .as_ref()
        .and_then(|f| f.cleanup.as_ref())
        .map(|c| CleanupSettings {
            pass_interval_secs: c.pass_interval_secs.unwrap_or(defaults.pass_interval_secs),
            max_passes: c.max_passes.unwrap_or(defaults.max_passes),
        })
        .unwrap_or(defaults);

    let api_base_url = file.and_then(|f| f.api.and_then(|a| a.base_url));

    Ok(ResolvedConfig {
        home,
        credentials_file,
        token_file,
        rules,
        cleanup,
        api_base_url,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
