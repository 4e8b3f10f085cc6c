//! Search summary types
//!
//! Aggregates a finished search into the counts shown in reports.

use crate::crawler::SearchOutcome;
use crate::model::{CapturedThread, JobKind};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Summary of one search run
#[derive(Debug, Clone)]
pub struct SearchSummary {
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,

    /// The pattern that was searched for
    pub pattern: String,

    /// Keywords used for coloring (empty for complex patterns)
    pub keywords: Vec<String>,

    /// Boards that were searched
    pub boards: Vec<String>,

    /// Total number of results
    pub total_results: usize,

    /// Results produced by full-capture jobs
    pub full_capture_results: usize,

    /// Results produced by search jobs
    pub search_results: usize,

    /// Results that carry a media URL
    pub media_links: usize,

    /// Results whose media was saved locally
    pub downloaded_files: usize,

    /// Results per board
    pub results_by_board: BTreeMap<String, usize>,

    /// Threads that triggered full capture
    pub captured: Vec<CapturedThread>,
}

impl SearchSummary {
    /// Builds a summary from a finished search
    pub fn from_outcome(pattern: &str, boards: &[String], outcome: &SearchOutcome) -> Self {
        let mut results_by_board = BTreeMap::new();
        for result in &outcome.results {
            *results_by_board.entry(result.board.clone()).or_insert(0) += 1;
        }

        Self {
            generated_at: Utc::now(),
            pattern: pattern.to_string(),
            keywords: outcome.keywords.as_slice().to_vec(),
            boards: boards.to_vec(),
            total_results: outcome.results.len(),
            full_capture_results: outcome.count_by_kind(JobKind::FullCapture),
            search_results: outcome.count_by_kind(JobKind::Search),
            media_links: outcome
                .results
                .iter()
                .filter(|r| r.media_url.is_some())
                .count(),
            downloaded_files: outcome
                .results
                .iter()
                .filter(|r| r.media_file.is_some())
                .count(),
            results_by_board,
            captured: outcome.captured.clone(),
        }
    }

    /// Percentage of media links that were saved locally
    pub fn download_rate(&self) -> f64 {
        if self.media_links == 0 {
            return 0.0;
        }
        (self.downloaded_files as f64 / self.media_links as f64) * 100.0
    }
}
