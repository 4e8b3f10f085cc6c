//! Work items produced by thread classification

use serde::Serialize;
use std::fmt;

/// The processing mode a thread was assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    /// Every post of the thread is harvested
    FullCapture,
    /// Only posts matching the search pattern are harvested
    Search,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullCapture => write!(f, "full-capture"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// A single thread scheduled for processing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Job {
    FullCapture { board: String, thread_id: u64 },
    Search { board: String, thread_id: u64 },
}

impl Job {
    /// Returns the job's kind tag
    pub fn kind(&self) -> JobKind {
        match self {
            Self::FullCapture { .. } => JobKind::FullCapture,
            Self::Search { .. } => JobKind::Search,
        }
    }

    /// Board the job's thread lives on
    pub fn board(&self) -> &str {
        match self {
            Self::FullCapture { board, .. } | Self::Search { board, .. } => board,
        }
    }

    /// Thread the job processes
    pub fn thread_id(&self) -> u64 {
        match self {
            Self::FullCapture { thread_id, .. } | Self::Search { thread_id, .. } => *thread_id,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}/{}", self.kind(), self.board(), self.thread_id())
    }
}

/// A thread whose subject or body matched the title filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedThread {
    pub board: String,
    pub thread_id: u64,
    pub subject: String,
}
