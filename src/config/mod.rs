//! Configuration module for Board Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use board_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Workers: {}", config.search.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BoardsConfig, Config, OutputConfig, SearchConfig, SourceConfig, DEFAULT_DOWNLOAD_DIR,
    DEFAULT_MAX_THREADS_PER_BOARD, DEFAULT_MAX_WORKERS, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
pub(crate) use validation::validate_board_code;
