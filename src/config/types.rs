use crate::model::BoardCategory;
use serde::Deserialize;

/// Default number of threads sampled from each board's catalog
pub const DEFAULT_MAX_THREADS_PER_BOARD: usize = 10;

/// Default number of jobs allowed in flight at once
pub const DEFAULT_MAX_WORKERS: usize = 20;

/// Default folder that downloaded media lands in
pub const DEFAULT_DOWNLOAD_DIR: &str = "media";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Board Sieve
///
/// Every section has defaults, so an empty file (or no file at all) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub source: SourceConfig,
    pub boards: BoardsConfig,
    pub output: OutputConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of threads taken from each board's catalog
    #[serde(rename = "max-threads-per-board")]
    pub max_threads_per_board: usize,

    /// Maximum number of jobs running concurrently
    #[serde(rename = "max-workers")]
    pub max_workers: usize,

    /// Whether media attached to search hits is saved locally
    pub download: bool,

    /// Root folder for downloaded media
    #[serde(rename = "download-dir")]
    pub download_dir: String,

    /// Thread-title filter; when absent the lowercased search pattern is used
    #[serde(rename = "title-filter")]
    pub title_filter: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_threads_per_board: DEFAULT_MAX_THREADS_PER_BOARD,
            max_workers: DEFAULT_MAX_WORKERS,
            download: false,
            download_dir: DEFAULT_DOWNLOAD_DIR.to_string(),
            title_filter: None,
        }
    }
}

/// Content source endpoints and HTTP settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL serving `boards.json`, catalogs and thread JSON
    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Base URL serving media files
    #[serde(rename = "media-base")]
    pub media_base: String,

    /// Base URL used for human-facing post links
    #[serde(rename = "site-base")]
    pub site_base: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://a.4cdn.org".to_string(),
            media_base: "https://i.4cdn.org".to_string(),
            site_base: "https://boards.4channel.org".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("board-sieve/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Which boards to search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoardsConfig {
    /// Category used when no explicit list is given
    pub category: BoardCategory,

    /// Explicit board codes (e.g. `["g", "pol"]`)
    pub list: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render comment HTML as plain text on the console
    #[serde(rename = "plain-text")]
    pub plain_text: bool,

    /// Optional markdown report destination
    #[serde(rename = "report-path")]
    pub report_path: Option<String>,

    /// Optional JSON export destination
    #[serde(rename = "json-path")]
    pub json_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plain_text: true,
            report_path: None,
            json_path: None,
        }
    }
}
