//! Command-line interface for tubecat.
//!
//! Provides commands for categorizing scraped videos, publishing the
//! categories as YouTube playlists, bulk-deleting matching playlists, and
//! inspecting the resolved configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{Authenticator, YouTubeClient};
use crate::config;
use crate::core::{classify, publish, run_cleanup, CleanupOptions};
use crate::domain::{CategoryBucket, VideoRecord};

/// tubecat - categorize scraped videos and manage YouTube playlists
#[derive(Parser, Debug)]
#[command(name = "tubecat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Categorize scraped videos and write the result (no network)
    Categorize {
        /// Scrape JSON file (array of {title, link, ariaLabel})
        #[arg(short, long, default_value = "scrape.json")]
        input: PathBuf,

        /// Output JSON file of categorized videos
        #[arg(short, long, default_value = "categorized_videos.json")]
        output: PathBuf,
    },

    /// Categorize, then create a private playlist per category and fill it
    Publish {
        /// Scrape JSON file (array of {title, link, ariaLabel})
        #[arg(short, long, default_value = "scrape.json")]
        input: PathBuf,

        /// Output JSON file of categorized videos
        #[arg(short, long, default_value = "categorized_videos.json")]
        output: PathBuf,
    },

    /// Delete playlists whose titles contain a configured category name
    Cleanup {
        /// Seconds to sleep between passes
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Maximum number of passes before giving up
        #[arg(long)]
        max_passes: Option<u32>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Categorize { input, output } => categorize(&input, &output).await.map(|_| ()),
            Commands::Publish { input, output } => publish_playlists(&input, &output).await,
            Commands::Cleanup {
                interval_secs,
                max_passes,
            } => cleanup(interval_secs, max_passes).await,
            Commands::Config => show_config(),
        }
    }
}

/// Read and parse the scrape JSON file
fn read_records(path: &Path) -> Result<Vec<VideoRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}

/// Write categorized buckets pretty-printed
fn write_buckets(path: &Path, buckets: &[CategoryBucket]) -> Result<()> {
    let raw = serde_json::to_string_pretty(buckets)?;
    std::fs::write(path, raw)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Classify the input file and write the categorized output
async fn categorize(input: &Path, output: &Path) -> Result<Vec<CategoryBucket>> {
    let cfg = config::config()?;

    let records = read_records(input)?;
    eprintln!("Number of videos: {}", records.len());

    let buckets = classify(&records, &cfg.rules);
    for bucket in &buckets {
        eprintln!("Category: {}, Number of Videos: {}", bucket.category, bucket.len());
    }

    write_buckets(output, &buckets)?;
    eprintln!("Categorized videos saved to {}", output.display());

    Ok(buckets)
}

/// Authenticate and build a YouTube client
async fn build_client() -> Result<YouTubeClient> {
    let cfg = config::config()?;

    let auth = Authenticator::from_files(&cfg.credentials_file, &cfg.token_file)?;
    let token = auth.access_token().await.context("Authentication failed")?;

    Ok(match &cfg.api_base_url {
        Some(base_url) => YouTubeClient::with_base_url(base_url, token),
        None => YouTubeClient::new(token),
    })
}

/// Categorize, then create and fill playlists
async fn publish_playlists(input: &Path, output: &Path) -> Result<()> {
    let cfg = config::config()?;
    let buckets = categorize(input, output).await?;

    let client = build_client().await?;
    let report = publish(&client, &cfg.rules, &buckets)
        .await
        .context("Publishing playlists failed")?;

    eprintln!(
        "Created {} playlists with {} videos ({} skipped)",
        report.playlists_created, report.items_inserted, report.items_skipped
    );
    Ok(())
}

/// Run the bounded delete-matching loop
async fn cleanup(interval_secs: Option<u64>, max_passes: Option<u32>) -> Result<()> {
    let cfg = config::config()?;
    let names: Vec<String> = cfg.rules.names().map(String::from).collect();

    let opts = CleanupOptions {
        pass_interval: Duration::from_secs(interval_secs.unwrap_or(cfg.cleanup.pass_interval_secs)),
        max_passes: max_passes.unwrap_or(cfg.cleanup.max_passes),
    };

    let client = build_client().await?;
    let passes = run_cleanup(&client, &names, opts)
        .await
        .context("Cleanup failed")?;

    eprintln!("Cleanup finished after {} pass(es)", passes);
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("tubecat configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:        {}", cfg.home.display());
    println!("  Credentials: {}", cfg.credentials_file.display());
    println!("  Token cache: {}", cfg.token_file.display());
    println!();
    println!("API base URL: {}", cfg.api_base_url.as_deref().unwrap_or("(default)"));
    println!();
    println!("Cleanup:");
    println!("  Pass interval: {}s", cfg.cleanup.pass_interval_secs);
    println!("  Max passes:    {}", cfg.cleanup.max_passes);
    println!();
    println!("Categories ({}):", cfg.rules.len());
    for rule in cfg.rules.rules() {
        println!("  {} ({} keywords)", rule.name, rule.keywords.len());
    }

    Ok(())
}
