//! Match results returned to callers

use crate::model::JobKind;
use serde::Serialize;
use std::path::PathBuf;

/// Maximum number of characters kept in a snippet
pub const SNIPPET_CHARS: usize = 200;

/// One harvested post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub board: String,
    pub thread_id: u64,
    pub post_id: u64,

    /// Canonical link to the post
    pub url: String,

    /// Remote media URL, when the post has an attachment
    pub media_url: Option<String>,

    /// Local copy of the media, when it was downloaded
    pub media_file: Option<PathBuf>,

    /// First characters of the matched text
    pub snippet: String,

    /// Which job kind produced this result
    pub origin: JobKind,
}

/// Returns the first `SNIPPET_CHARS` characters of `text`
///
/// Counts characters, not bytes, and does not trim at word boundaries.
pub fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}
