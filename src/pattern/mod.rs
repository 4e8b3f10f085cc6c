//! Search pattern handling
//!
//! This module contains:
//! - Compiling the user's search pattern
//! - Detecting plain keyword alternations (`cat|dog`) for per-keyword coloring
//! - Computing highlight spans over matched text

mod highlight;
mod keywords;

pub use highlight::{
    Color, HighlightMode, HighlightSpan, Highlighter, Palette, SpanStyle, DEFAULT_PALETTE,
};
pub use keywords::{extract_keywords, KeywordSet};

use crate::SieveError;
use regex::{Regex, RegexBuilder};

/// Compiles the user's search pattern, case-insensitively
///
/// This is the only fatal user-facing check: callers run it before any job is
/// scheduled so an invalid pattern aborts with no partial results.
///
/// # Example
///
/// ```
/// use board_sieve::pattern::compile_pattern;
///
/// let pattern = compile_pattern("cat|dog").unwrap();
/// assert!(pattern.is_match("A CAT appears"));
/// assert!(compile_pattern("(unclosed").is_err());
/// ```
pub fn compile_pattern(pattern: &str) -> Result<Regex, SieveError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(SieveError::Pattern)
}

/// Derives the thread-title filter from the search pattern
///
/// The filter is a plain lowercase substring, not a pattern.
pub fn title_filter_for(pattern: &str) -> String {
    pattern.trim().to_lowercase()
}
