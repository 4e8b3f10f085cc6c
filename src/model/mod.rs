//! Data model shared by the crawler, pattern and output layers
//!
//! # Components
//!
//! - `Board` / `BoardCategory`: board codes and the SFW/NSFW listing filter
//! - `ThreadSummary` / `Post`: read-only views of catalog and thread payloads
//! - `Job` / `JobKind`: the two processing modes a thread can be assigned
//! - `MatchResult` / `CapturedThread`: the externally visible output

mod board;
mod job;
mod result;
mod thread;

pub use board::{Board, BoardCategory, BoardVisibility};
pub use job::{CapturedThread, Job, JobKind};
pub use result::{snippet, MatchResult, SNIPPET_CHARS};
pub use thread::{MediaRef, Post, ThreadSummary};
