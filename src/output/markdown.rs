//! Markdown report generation
//!
//! This module generates human-readable markdown reports of search results,
//! including summary counts, captured threads, and every harvested post.

use crate::model::MatchResult;
use crate::output::markup::to_plain_text;
use crate::output::{OutputResult, SearchSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown report for a finished search
///
/// # Arguments
///
/// * `summary` - Aggregated counts for the run
/// * `results` - The results to list
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(
    summary: &SearchSummary,
    results: &[MatchResult],
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(summary, results);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a search report as markdown
pub fn format_markdown_report(summary: &SearchSummary, results: &[MatchResult]) -> String {
    let mut md = String::new();

    md.push_str("# Board Sieve Report\n\n");

    // Run metadata
    md.push_str("## Search\n\n");
    md.push_str(&format!("- **Pattern**: `{}`\n", summary.pattern));
    if summary.keywords.is_empty() {
        md.push_str("- **Keywords**: none (complex pattern)\n");
    } else {
        md.push_str(&format!("- **Keywords**: {}\n", summary.keywords.join(", ")));
    }
    let boards: Vec<String> = summary.boards.iter().map(|b| format!("/{}/", b)).collect();
    md.push_str(&format!("- **Boards**: {}\n", boards.join(" ")));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Overall statistics
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Results**: {}\n", summary.total_results));
    md.push_str(&format!(
        "- **From Captured Threads**: {}\n",
        summary.full_capture_results
    ));
    md.push_str(&format!(
        "- **From Pattern Search**: {}\n",
        summary.search_results
    ));
    md.push_str(&format!("- **Media Links**: {}\n", summary.media_links));
    md.push_str(&format!(
        "- **Downloaded Files**: {} ({:.2}%)\n\n",
        summary.downloaded_files,
        summary.download_rate()
    ));

    if !summary.results_by_board.is_empty() {
        md.push_str("### Results by Board\n\n");
        md.push_str("| Board | Results |\n");
        md.push_str("|-------|---------|\n");
        for (board, count) in &summary.results_by_board {
            md.push_str(&format!("| /{}/ | {} |\n", board, count));
        }
        md.push('\n');
    }

    if !summary.captured.is_empty() {
        md.push_str("## Captured Threads\n\n");
        for thread in &summary.captured {
            let subject = to_plain_text(&thread.subject);
            if subject.is_empty() {
                md.push_str(&format!("- /{}/{}\n", thread.board, thread.thread_id));
            } else {
                md.push_str(&format!(
                    "- /{}/{}: {}\n",
                    thread.board, thread.thread_id, subject
                ));
            }
        }
        md.push('\n');
    }

    if !results.is_empty() {
        md.push_str("## Results\n\n");
        for result in results {
            md.push_str(&format!(
                "### [/{}/{} #{}]({}) ({})\n\n",
                result.board, result.thread_id, result.post_id, result.url, result.origin
            ));

            let snippet = to_plain_text(&result.snippet);
            for line in snippet.lines().filter(|l| !l.trim().is_empty()) {
                md.push_str(&format!("> {}\n", line));
            }
            if !snippet.trim().is_empty() {
                md.push('\n');
            }

            if let Some(media_url) = &result.media_url {
                md.push_str(&format!("- Media: <{}>\n", media_url));
                if let Some(path) = &result.media_file {
                    md.push_str(&format!("- Saved: `{}`\n", path.display()));
                }
                md.push('\n');
            }
        }
    }

    md
}
