use std::time::Duration;

/// Configuration for the worker pool.
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    /// Maximum concurrent jobs that can be processed simultaneously.
    ///
    /// Resolution jobs are I/O bound and share the database pool with the
    /// request path, so this stays small.
    pub max_concurrent_jobs: usize,

    /// Number of dispatcher tasks that poll Redis for jobs.
    ///
    /// Automatically calculated as 1 dispatcher per 40 concurrent jobs
    /// (minimum 1).
    pub dispatcher_count: usize,

    /// How long to wait between polls when the queue is empty (milliseconds).
    pub poll_interval_ms: u64,

    /// Maximum time a job can run before being cancelled (seconds).
    pub job_timeout_seconds: u64,

    /// Maximum time to wait for a dispatcher to shutdown (seconds).
    /// If a dispatcher doesn't stop within this time, a warning is logged.
    pub shutdown_timeout_seconds: u64,
}

/// Small fixed pool: two concurrent resolutions keep page-view latency
/// unaffected while draining the queue fast enough for a weekly show.
const DEFAULT_MAX_CONCURRENT_JOBS: usize = 2;

impl WorkerPoolConfig {
    /// Create a new configuration with sensible defaults.
    ///
    /// # Arguments
    /// * `max_concurrent_jobs` - Maximum concurrent jobs across the pool
    pub fn new(max_concurrent_jobs: usize) -> Self {
        // Scale dispatchers: 1 per 40 concurrent jobs, minimum 1.
        let dispatcher_count = ((max_concurrent_jobs + 39) / 40).max(1);

        Self {
            max_concurrent_jobs,
            dispatcher_count,
            poll_interval_ms: 50,
            job_timeout_seconds: 60,
            shutdown_timeout_seconds: 5,
        }
    }

    /// Get job timeout as Duration.
    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_seconds)
    }

    /// Get poll interval as Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Get shutdown timeout as Duration.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_JOBS)
    }
}
