//! Worker queue configuration for naming, TTL and cleanup settings.

use std::time::Duration;

const DEFAULT_QUEUE_NAME: &str = "castlink:worker:queue";

/// Maximum age for jobs in the queue before they're considered stale.
/// A resolution job nobody picked up within an hour is better re-derived
/// from a fresh page view than run with stale feed metadata.
const DEFAULT_JOB_TTL: Duration = Duration::from_secs(3600);

/// How often the cleanup task sweeps stale jobs.
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Configuration for the worker queue.
///
/// The queue name doubles as the Redis key namespace: throttle keys live
/// under `{queue_name}:throttle:`, which is what lets tests isolate
/// themselves with a unique name per test.
#[derive(Clone)]
pub struct WorkerQueueConfig {
    /// Redis key name for the job queue sorted set.
    pub queue_name: String,
    /// Maximum age for jobs before considered stale and removed by cleanup.
    pub job_ttl: Duration,
    /// How often the cleanup task runs to remove stale jobs.
    pub cleanup_interval: Duration,
}

impl Default for WorkerQueueConfig {
    fn default() -> Self {
        Self {
            queue_name: DEFAULT_QUEUE_NAME.to_string(),
            job_ttl: DEFAULT_JOB_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}
