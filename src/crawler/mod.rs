//! Crawler module for thread classification and job execution
//!
//! This module contains the core search logic, including:
//! - Splitting catalog threads into full-capture and search jobs
//! - Running jobs on a bounded worker pool in two waves
//! - Matching posts against the search pattern
//! - Downloading media at most once per filename
//! - Overall search coordination

mod classifier;
mod coordinator;
mod downloader;
mod matcher;
mod scheduler;

pub use classifier::{classify_board, matches_title_filter, ClassifiedJobs};
pub use coordinator::{search, SearchOutcome, SearchRequest, Searcher};
pub use downloader::{file_name_from_url, thread_media_dir, MediaDownloader};
pub use matcher::PostMatcher;
pub use scheduler::WorkerPool;
