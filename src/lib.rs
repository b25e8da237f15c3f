//! mal-crawler: an ID-space scanner and page extractor for an anime catalog site
//!
//! This crate discovers which numeric identifiers on the catalog site are real
//! entries and extracts their HTML pages (anime detail, episode lists,
//! character/staff rosters) into typed, JSON-ready records.

pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod records;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Page for id {id} is not a valid entity page: missing {field}")]
    InvalidEntityPage { id: u32, field: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checkpoint::{CheckpointStore, JsonFileCheckpoint, SqliteCheckpoint};
pub use config::Config;
pub use crawler::Scanner;
pub use records::{NotFound, Outcome};
