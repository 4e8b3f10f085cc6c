//! Bounded worker pool for job execution
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore shared by every wave
//! - Spawning one task per job and collecting results as they finish
//! - Isolating job panics so they cost only that job's results
//!
//! A wave is one call to [`WorkerPool::run_wave`]; it returns only after every
//! job in it has finished, which is the barrier between waves.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fixed-size pool of concurrent job slots
#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// Global semaphore limiting jobs in flight
    semaphore: Arc<Semaphore>,

    /// Configured ceiling, kept for reporting
    max_workers: usize,
}

impl WorkerPool {
    /// Creates a pool allowing `max_workers` jobs in flight (at least one)
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Runs every job to completion with at most `max_workers` in flight
    ///
    /// Results are appended in completion order, which varies between runs.
    /// A job whose task panics is logged and contributes nothing.
    ///
    /// # Arguments
    ///
    /// * `wave` - Name used in log lines
    /// * `jobs` - Work items for this wave
    /// * `handler` - Builds the future that processes one job
    pub async fn run_wave<J, R, F, Fut>(&self, wave: &str, jobs: Vec<J>, handler: F) -> Vec<R>
    where
        J: Send + 'static,
        R: Send + 'static,
        F: Fn(J) -> Fut,
        Fut: Future<Output = Vec<R>> + Send + 'static,
    {
        let total = jobs.len();
        if total == 0 {
            tracing::debug!("Wave '{}' has no jobs", wave);
            return Vec::new();
        }

        tracing::info!(
            "Starting wave '{}': {} jobs, {} workers",
            wave,
            total,
            self.max_workers
        );

        let mut tasks = JoinSet::new();
        for job in jobs {
            let semaphore = self.semaphore.clone();
            let work = handler(job);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Vec::new(),
                };
                work.await
            });
        }

        let mut results = Vec::new();
        let mut finished = 0;
        let mut failed = 0;

        while let Some(joined) = tasks.join_next().await {
            finished += 1;
            match joined {
                Ok(batch) => results.extend(batch),
                Err(e) => {
                    failed += 1;
                    tracing::error!("Job in wave '{}' did not finish: {}", wave, e);
                }
            }
            tracing::debug!("Wave '{}': {}/{} jobs done", wave, finished, total);
        }

        tracing::info!(
            "Wave '{}' complete: {} results from {} jobs ({} failed)",
            wave,
            results.len(),
            total,
            failed
        );

        results
    }
}
