//! Thread classification
//!
//! Splits a board's catalog into full-capture jobs (the thread's subject or
//! body contains the title filter) and search jobs (everything else). The
//! filter is a plain lowercase substring test, not the post-level pattern.

use crate::model::{CapturedThread, Job, ThreadSummary};

/// Jobs produced for one or more boards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedJobs {
    /// Threads to harvest completely
    pub full_capture: Vec<Job>,

    /// Threads to search post by post
    pub search: Vec<Job>,

    /// Side-channel record of every full-capture thread
    pub captured: Vec<CapturedThread>,
}

impl ClassifiedJobs {
    /// Total number of jobs across both kinds
    pub fn len(&self) -> usize {
        self.full_capture.len() + self.search.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another board's jobs, keeping board order
    pub fn merge(&mut self, other: ClassifiedJobs) {
        self.full_capture.extend(other.full_capture);
        self.search.extend(other.search);
        self.captured.extend(other.captured);
    }
}

/// Returns true if the thread's subject or body contains `filter`
///
/// Case-insensitive substring test; an empty filter never matches.
pub fn matches_title_filter(thread: &ThreadSummary, filter: &str) -> bool {
    if filter.is_empty() {
        return false;
    }

    let filter = filter.to_lowercase();
    thread.subject.to_lowercase().contains(&filter)
        || thread.comment.to_lowercase().contains(&filter)
}

/// Classifies the first `max_threads` threads of a board's catalog
///
/// Each considered thread lands in exactly one of the two job lists.
///
/// # Arguments
///
/// * `board` - Board the catalog belongs to
/// * `threads` - The catalog, in catalog order
/// * `max_threads` - How many threads to take from the front of the catalog
/// * `title_filter` - Substring that promotes a thread to full capture
pub fn classify_board(
    board: &str,
    threads: &[ThreadSummary],
    max_threads: usize,
    title_filter: Option<&str>,
) -> ClassifiedJobs {
    let mut jobs = ClassifiedJobs::default();

    for thread in threads.iter().take(max_threads) {
        let captured = title_filter
            .map(|filter| matches_title_filter(thread, filter))
            .unwrap_or(false);

        if captured {
            jobs.full_capture.push(Job::FullCapture {
                board: board.to_string(),
                thread_id: thread.thread_id,
            });
            jobs.captured.push(CapturedThread {
                board: board.to_string(),
                thread_id: thread.thread_id,
                subject: thread.subject.clone(),
            });
        } else {
            jobs.search.push(Job::Search {
                board: board.to_string(),
                thread_id: thread.thread_id,
            });
        }
    }

    tracing::debug!(
        "/{}/: {} full-capture, {} search jobs from {} catalog threads",
        board,
        jobs.full_capture.len(),
        jobs.search.len(),
        threads.len()
    );

    jobs
}
