//! Catalog and thread views handed out by the content client

/// One thread as listed in a board's catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    /// Board the thread lives on
    pub board: String,

    /// Thread identifier (the opening post's number)
    pub thread_id: u64,

    /// Thread subject, empty when absent
    pub subject: String,

    /// Opening post body, empty when absent
    pub comment: String,
}

/// Reference to a file attached to a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Remote filename token (`tim` on the wire)
    pub token: String,

    /// File extension including the leading dot, e.g. `.jpg`
    pub extension: String,
}

impl MediaRef {
    /// Remote filename, e.g. `1700000000123.jpg`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.token, self.extension)
    }
}

/// One post of a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Post identifier
    pub post_id: u64,

    /// Post body
    pub comment: Option<String>,

    /// Post subject (usually only set on the opening post)
    pub subject: Option<String>,

    /// Attached media, if any
    pub media: Option<MediaRef>,
}

impl Post {
    /// Comment body, empty when absent
    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Text the primary pattern is tested against: comment, a space, then subject
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.comment_text(),
            self.subject.as_deref().unwrap_or("")
        )
    }
}
