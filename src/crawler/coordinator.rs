//! Search coordinator - main search orchestration logic
//!
//! This module ties the pieces together:
//! - Compiling the pattern and extracting highlight keywords
//! - Fetching each board's catalog and classifying its threads
//! - Running the full-capture wave, then the search wave, on one worker pool
//! - Downloading media for the results that need it

use crate::config::{
    SearchConfig, DEFAULT_DOWNLOAD_DIR, DEFAULT_MAX_THREADS_PER_BOARD, DEFAULT_MAX_WORKERS,
};
use crate::crawler::classifier::{classify_board, ClassifiedJobs};
use crate::crawler::downloader::{thread_media_dir, MediaDownloader};
use crate::crawler::matcher::PostMatcher;
use crate::crawler::scheduler::WorkerPool;
use crate::model::{CapturedThread, Job, JobKind, MatchResult};
use crate::pattern::{compile_pattern, extract_keywords, title_filter_for, KeywordSet};
use crate::source::ContentClient;
use crate::SieveError;
use std::path::PathBuf;
use std::sync::Arc;

/// Parameters of one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Primary pattern tested against every post of a search job
    pub pattern: String,

    /// Boards to search, in order
    pub boards: Vec<String>,

    /// Threads taken from the front of each catalog
    pub max_threads_per_board: usize,

    /// Jobs allowed in flight at once
    pub max_workers: usize,

    /// Whether media of search hits is saved locally
    pub download_enabled: bool,

    /// Root folder for saved media
    pub download_dir: PathBuf,

    /// Substring that promotes a thread to full capture
    pub title_filter: Option<String>,
}

impl SearchRequest {
    /// Creates a request with default limits
    ///
    /// The title filter defaults to the trimmed, lowercased pattern.
    pub fn new(pattern: impl Into<String>, boards: Vec<String>) -> Self {
        let pattern = pattern.into();
        let title_filter = Some(title_filter_for(&pattern));

        Self {
            pattern,
            boards,
            max_threads_per_board: DEFAULT_MAX_THREADS_PER_BOARD,
            max_workers: DEFAULT_MAX_WORKERS,
            download_enabled: false,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            title_filter,
        }
    }

    /// Creates a request using the limits from the search configuration
    pub fn from_config(
        pattern: impl Into<String>,
        boards: Vec<String>,
        config: &SearchConfig,
    ) -> Self {
        let mut request = Self::new(pattern, boards);
        request.max_threads_per_board = config.max_threads_per_board;
        request.max_workers = config.max_workers;
        request.download_enabled = config.download;
        request.download_dir = PathBuf::from(&config.download_dir);
        if let Some(filter) = &config.title_filter {
            request.title_filter = Some(filter.trim().to_lowercase());
        }
        request
    }
}

/// Everything a search run produces
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Full-capture results first, then search results, each in completion order
    pub results: Vec<MatchResult>,

    /// Threads that triggered full capture
    pub captured: Vec<CapturedThread>,

    /// Keywords found in the pattern (empty for complex patterns)
    pub keywords: KeywordSet,
}

impl SearchOutcome {
    /// Number of results produced by jobs of `kind`
    pub fn count_by_kind(&self, kind: JobKind) -> usize {
        self.results.iter().filter(|r| r.origin == kind).count()
    }
}

/// Processes individual jobs; shared by every task of a wave
struct JobRunner {
    client: ContentClient,
    matcher: PostMatcher,
    downloader: MediaDownloader,
    download_enabled: bool,
    download_dir: PathBuf,
}

impl JobRunner {
    async fn run(self: Arc<Self>, job: Job) -> Vec<MatchResult> {
        let board = job.board();
        let thread_id = job.thread_id();

        let posts = self
            .client
            .fetch_thread(board, thread_id)
            .await
            .or_empty(&format!("Skipping thread /{}/{}", board, thread_id));

        // full-capture threads always keep their media
        let (mut results, download) = match job.kind() {
            JobKind::FullCapture => (self.matcher.capture_posts(board, thread_id, &posts), true),
            JobKind::Search => (
                self.matcher.search_posts(board, thread_id, &posts),
                self.download_enabled,
            ),
        };

        if download {
            let dest_dir = thread_media_dir(&self.download_dir, board, thread_id);
            for result in &mut results {
                if let Some(url) = result.media_url.as_deref() {
                    result.media_file = self.downloader.try_download(url, &dest_dir).await;
                }
            }
        }

        tracing::debug!("{}: {} results from {} posts", job, results.len(), posts.len());
        results
    }
}

/// Main search coordinator
pub struct Searcher {
    client: ContentClient,
}

impl Searcher {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    /// Fetches each board's catalog once and classifies its threads
    ///
    /// A board whose catalog cannot be fetched contributes no jobs.
    pub async fn classify(
        &self,
        boards: &[String],
        max_threads_per_board: usize,
        title_filter: Option<&str>,
    ) -> ClassifiedJobs {
        let mut jobs = ClassifiedJobs::default();

        for board in boards {
            let threads = self
                .client
                .fetch_catalog(board)
                .await
                .or_empty(&format!("Skipping board /{}/", board));

            jobs.merge(classify_board(
                board,
                &threads,
                max_threads_per_board,
                title_filter,
            ));
        }

        tracing::info!(
            "Classified {} threads across {} boards: {} full-capture, {} search",
            jobs.len(),
            boards.len(),
            jobs.full_capture.len(),
            jobs.search.len()
        );

        jobs
    }

    /// Runs a complete search
    ///
    /// # Returns
    ///
    /// * `Ok(SearchOutcome)` - Search finished (possibly with zero results)
    /// * `Err(SieveError::Pattern)` - The pattern does not compile; nothing was fetched
    pub async fn run(&self, request: &SearchRequest) -> Result<SearchOutcome, SieveError> {
        let pattern = compile_pattern(&request.pattern)?;

        let keywords = extract_keywords(&request.pattern);
        if keywords.is_empty() {
            tracing::info!("Complex pattern, whole matches will be highlighted");
        } else {
            tracing::info!(
                "Keywords detected for coloring: {}",
                keywords.as_slice().join(", ")
            );
        }

        let title_filter = request
            .title_filter
            .as_deref()
            .filter(|filter| !filter.is_empty());

        let jobs = self
            .classify(&request.boards, request.max_threads_per_board, title_filter)
            .await;

        let runner = Arc::new(JobRunner {
            client: self.client.clone(),
            matcher: PostMatcher::new(pattern, self.client.endpoints().clone()),
            downloader: MediaDownloader::new(self.client.clone()),
            download_enabled: request.download_enabled,
            download_dir: request.download_dir.clone(),
        });
        let pool = WorkerPool::new(request.max_workers);

        // wave 1 must drain completely before wave 2 is created
        let mut results = pool
            .run_wave("full-capture", jobs.full_capture, |job| {
                runner.clone().run(job)
            })
            .await;

        let search_results = pool
            .run_wave("search", jobs.search, |job| runner.clone().run(job))
            .await;
        results.extend(search_results);

        tracing::info!(
            "Search finished: {} results, {} captured threads",
            results.len(),
            jobs.captured.len()
        );

        Ok(SearchOutcome {
            results,
            captured: jobs.captured,
            keywords,
        })
    }
}

/// Runs a complete search with a fresh coordinator
///
/// # Example
///
/// ```no_run
/// use board_sieve::config::SourceConfig;
/// use board_sieve::crawler::{search, SearchRequest};
/// use board_sieve::source::ContentClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ContentClient::new(&SourceConfig::default())?;
/// let request = SearchRequest::new("rust|zig", vec!["g".to_string()]);
/// let outcome = search(&client, &request).await?;
/// println!("{} results", outcome.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn search(
    client: &ContentClient,
    request: &SearchRequest,
) -> Result<SearchOutcome, SieveError> {
    Searcher::new(client.clone()).run(request).await
}
