//! Board Sieve: a bounded-concurrency board searcher
//!
//! This crate walks a paginated board → thread → post content source, splits
//! the threads it finds into full-capture and search jobs, runs those jobs on a
//! shared worker pool and returns the matching posts with highlight metadata.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod pattern;
pub mod source;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Board Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Malformed {
        url: String,
        source: serde_json::Error,
    },

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Cannot derive a filename from {url}")]
    NoFilename { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl SieveError {
    /// Classifies a transport error the way the fetch layer reports it
    pub(crate) fn from_transport(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SieveError::Timeout {
                url: url.to_string(),
            }
        } else {
            SieveError::Http {
                url: url.to_string(),
                source: error,
            }
        }
    }
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

/// Result type alias for Board Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{search, SearchOutcome, SearchRequest};
pub use model::{Board, BoardCategory, CapturedThread, Job, JobKind, MatchResult};
pub use pattern::{extract_keywords, Highlighter, KeywordSet};
pub use source::{ContentClient, Fetched};
