//! Highlight span computation
//!
//! Spans are byte ranges into the text they were computed for. Rendering them
//! (terminal colors, markup) is left to the output layer.

use crate::pattern::KeywordSet;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Display colors available to the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
}

/// Keyword colors, assigned in keyword order and reused cyclically
pub const DEFAULT_PALETTE: [Color; 12] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
];

/// Fixed color lookup used for keyword highlighting
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    colors: &'a [Color],
}

impl<'a> Palette<'a> {
    /// Creates a palette over `colors`
    ///
    /// An empty slice falls back to the default palette.
    pub fn new(colors: &'a [Color]) -> Self {
        if colors.is_empty() {
            Self {
                colors: &DEFAULT_PALETTE,
            }
        } else {
            Self { colors }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette slot for the keyword at `index`
    pub fn slot_for(&self, index: usize) -> usize {
        index % self.colors.len()
    }

    /// Color for the keyword at `index`
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[self.slot_for(index)]
    }
}

impl Default for Palette<'static> {
    fn default() -> Self {
        Self {
            colors: &DEFAULT_PALETTE,
        }
    }
}

/// How a span should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Keyword occurrence, colored by palette slot
    Keyword { slot: usize },
    /// Match of the whole search pattern
    Pattern,
}

/// A styled byte range `[start, end)` over a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub style: SpanStyle,
}

impl HighlightSpan {
    fn overlaps(&self, other: &HighlightSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The highlighting strategy in effect
#[derive(Debug, Clone)]
pub enum HighlightMode {
    /// One case-insensitive literal matcher per keyword, in keyword order
    Keywords(Vec<Regex>),
    /// The compiled search pattern
    WholePattern(Regex),
}

/// Computes highlight spans for snippets
#[derive(Debug, Clone)]
pub struct Highlighter<'a> {
    mode: HighlightMode,
    palette: Palette<'a>,
}

impl<'a> Highlighter<'a> {
    /// Picks keyword mode when `keywords` is non-empty, whole-pattern mode otherwise
    pub fn new(keywords: &KeywordSet, pattern: &Regex, palette: Palette<'a>) -> Self {
        let mode = if keywords.is_empty() {
            HighlightMode::WholePattern(pattern.clone())
        } else {
            HighlightMode::Keywords(keywords.iter().filter_map(literal_matcher).collect())
        };

        Self { mode, palette }
    }

    pub fn mode(&self) -> &HighlightMode {
        &self.mode
    }

    pub fn palette(&self) -> &Palette<'a> {
        &self.palette
    }

    /// Returns disjoint spans sorted by start offset
    ///
    /// In keyword mode a later keyword overwrites an earlier one wherever
    /// their occurrences overlap.
    pub fn highlight(&self, text: &str) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();

        match &self.mode {
            HighlightMode::Keywords(matchers) => {
                for (index, matcher) in matchers.iter().enumerate() {
                    let style = SpanStyle::Keyword {
                        slot: self.palette.slot_for(index),
                    };
                    for found in matcher.find_iter(text) {
                        paint(
                            &mut spans,
                            HighlightSpan {
                                start: found.start(),
                                end: found.end(),
                                style,
                            },
                        );
                    }
                }
            }
            HighlightMode::WholePattern(pattern) => {
                spans.extend(
                    pattern
                        .find_iter(text)
                        .filter(|m| !m.as_str().is_empty())
                        .map(|m| HighlightSpan {
                            start: m.start(),
                            end: m.end(),
                            style: SpanStyle::Pattern,
                        }),
                );
            }
        }

        spans.sort_by_key(|span| span.start);
        spans
    }
}

fn literal_matcher(keyword: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("Skipping keyword {:?}: {}", keyword, e);
            None
        }
    }
}

/// Adds `new` on top of `spans`, trimming or splitting whatever it covers
fn paint(spans: &mut Vec<HighlightSpan>, new: HighlightSpan) {
    let mut kept = Vec::with_capacity(spans.len() + 2);

    for span in spans.drain(..) {
        if !span.overlaps(&new) {
            kept.push(span);
            continue;
        }
        if span.start < new.start {
            kept.push(HighlightSpan {
                end: new.start,
                ..span
            });
        }
        if span.end > new.end {
            kept.push(HighlightSpan {
                start: new.end,
                ..span
            });
        }
    }

    kept.push(new);
    *spans = kept;
}
