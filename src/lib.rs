//! tubecat - categorize scraped videos and manage YouTube playlists
//!
//! A CLI that sorts a flat list of scraped video records into named topical
//! buckets with ordered keyword matching, publishes each bucket as a private
//! YouTube playlist, and bulk-deletes matching playlists in bounded passes.
//!
//! # Architecture
//!
//! - Classification is a pure function over an immutable, validated rule set;
//!   rule order is precedence order and is never reordered.
//! - All remote calls go through the `PlaylistApi` trait so orchestration can
//!   be exercised against an in-memory fake.
//! - Quota errors are typed separately from other API failures; cleanup
//!   retries them with a bounded sleep-and-retry loop, everything else is
//!   fatal.
//!
//! # Modules
//!
//! - `adapters`: External integrations (OAuth2 authenticator, YouTube client)
//! - `core`: Classification and orchestration (classify, publish, cleanup)
//! - `domain`: Data structures (VideoRecord, RuleSet, CategoryBucket)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Categorize only (no network)
//! tubecat categorize --input scrape.json
//!
//! # Categorize and create playlists
//! tubecat publish --input scrape.json
//!
//! # Delete playlists matching the configured categories
//! tubecat cleanup --max-passes 5
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ApiError, Authenticator, Playlist, PlaylistApi, YouTubeClient};
pub use core::{classify, delete_matching, publish, run_cleanup, CleanupOptions, PublishReport};
pub use domain::{extract_video_id, CategoryBucket, CategoryRule, RuleSet, VideoRecord, CATCH_ALL};
