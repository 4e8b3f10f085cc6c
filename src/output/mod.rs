//! Output module for presenting search results
//!
//! This module handles:
//! - Rendering results to the terminal with highlighted snippets
//! - Writing markdown reports and JSON exports
//! - Converting comment markup to plain text

pub mod console;
mod markdown;
pub mod markup;
mod summary;

pub use self::console::{format_results, render_results};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use markup::to_plain_text;
pub use summary::SearchSummary;

use crate::model::MatchResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Writes results to `output_path` as a pretty-printed JSON array
pub fn write_json_results(results: &[MatchResult], output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path).map_err(|e| {
        OutputError::Write(format!("cannot create {}: {}", output_path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobKind;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_results() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");

        let results = vec![MatchResult {
            board: "g".to_string(),
            thread_id: 10,
            post_id: 11,
            url: "https://boards.example.org/g/thread/10#p11".to_string(),
            media_url: None,
            media_file: None,
            snippet: "rust is nice".to_string(),
            origin: JobKind::Search,
        }];

        write_json_results(&results, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["post_id"], 11);
        assert_eq!(written[0]["origin"], "search");
        assert!(written[0]["media_url"].is_null());
    }

    #[test]
    fn test_write_json_to_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("results.json");

        let result = write_json_results(&[], &path);
        assert!(matches!(result, Err(OutputError::Write(_))));
    }
}
