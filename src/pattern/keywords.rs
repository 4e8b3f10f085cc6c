//! Keyword extraction from alternation patterns

/// Ordered keyword atoms taken from a search pattern
///
/// Order decides highlight color assignment; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

/// Splits a pattern into keywords when it is a plain alternation of words
///
/// Grouping parentheses are ignored. What remains must be `word ('|' word)*`,
/// optionally with one trailing `|`, where a word is a run of alphanumeric
/// characters or underscores. Anything else (dots, classes, anchors, empty
/// alternatives) returns an empty set, which callers read as "highlight the
/// whole pattern".
///
/// # Examples
///
/// ```
/// use board_sieve::pattern::extract_keywords;
///
/// let keywords = extract_keywords("cat|dog");
/// assert_eq!(keywords.as_slice(), ["cat", "dog"]);
///
/// assert!(extract_keywords("c.t").is_empty());
/// ```
pub fn extract_keywords(pattern: &str) -> KeywordSet {
    let stripped: String = pattern.chars().filter(|c| *c != '(' && *c != ')').collect();

    let pieces: Vec<&str> = stripped.split('|').collect();
    let last = pieces.len() - 1;

    for (idx, piece) in pieces.iter().enumerate() {
        if piece.is_empty() {
            // a single trailing pipe is tolerated
            if idx == last && idx > 0 {
                continue;
            }
            return KeywordSet::default();
        }
        if !piece.chars().all(is_word_char) {
            return KeywordSet::default();
        }
    }

    KeywordSet::new(
        pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
