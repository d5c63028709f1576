//! Durable work queue with throttled submission.
//!
//! Jobs are JSON members of a Redis sorted set scored by submit time, so the
//! worker pool drains oldest-first and stale entries can be swept by score.
//! Duplicate suppression is deliberately a separate concern from the queue
//! itself: an explicit `(dedup key -> expiry)` store realized as Redis
//! `SET NX PX` keys, checked-and-set atomically in the same Lua script that
//! pushes the job.
//!
//! There is no retry policy. Delivery is at-least-once and submission can be
//! repeated manually, so the job handler has to be idempotent either way.

pub mod config;
mod lua;

pub use config::WorkerQueueConfig;

use std::sync::Arc;

use chrono::Utc;
use fred::prelude::*;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use lua::{CLEANUP_STALE_JOBS_SCRIPT, POP_JOB_SCRIPT, SUBMIT_JOB_SCRIPT};

use crate::{
    error::{worker::WorkerError, Error},
    model::worker::{QueuedJob, WorkerJob},
};

#[derive(Clone)]
pub struct WorkerQueue {
    pool: Pool,
    config: WorkerQueueConfig,
    cleanup_handle: Arc<RwLock<Option<JoinHandle<()>>>>,
    cleanup_shutdown: Arc<Notify>,
}

impl WorkerQueue {
    pub fn new(pool: Pool) -> Self {
        Self::with_config(pool, WorkerQueueConfig::default())
    }

    /// Create a queue with custom naming/TTL settings (used by tests to
    /// isolate themselves under unique queue names).
    pub fn with_config(pool: Pool, config: WorkerQueueConfig) -> Self {
        Self {
            pool,
            config,
            cleanup_handle: Arc::new(RwLock::new(None)),
            cleanup_shutdown: Arc::new(Notify::new()),
        }
    }

    /// Submit a job unless its dedup key is inside an open throttle window.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(id))` when the job was enqueued, `Ok(None)` when an
    /// identical dedup key was submitted within `window` and the window has
    /// not yet expired. Redis communication errors and invalid jobs are
    /// `Err`; the page-view caller treats those as "skip the refresh".
    pub async fn submit(
        &self,
        job: WorkerJob,
        window: std::time::Duration,
    ) -> Result<Option<Uuid>, Error> {
        let identity = job.identity()?;
        let queued = QueuedJob::new(job);
        let payload = serde_json::to_string(&queued)
            .map_err(|e| WorkerError::SerializationError(e.to_string()))?;

        let enqueued = self
            .push_payload(payload, &identity, window.as_millis() as i64)
            .await?;

        Ok(enqueued.then_some(queued.id))
    }

    /// Put an already-popped job back, bypassing the throttle.
    ///
    /// Used by the pool when it pops a job while shutting down.
    pub async fn requeue(&self, job: QueuedJob) -> Result<(), Error> {
        let identity = job.job.identity()?;
        let payload = serde_json::to_string(&job)
            .map_err(|e| WorkerError::SerializationError(e.to_string()))?;

        self.push_payload(payload, &identity, 0).await?;

        Ok(())
    }

    async fn push_payload(
        &self,
        payload: String,
        identity: &str,
        window_ms: i64,
    ) -> Result<bool, Error> {
        let score = Utc::now().timestamp_millis();
        let throttle_key = self.throttle_key(identity);

        let result: i64 = self
            .pool
            .eval(
                SUBMIT_JOB_SCRIPT,
                vec![self.config.queue_name.clone(), throttle_key],
                vec![payload, score.to_string(), window_ms.to_string()],
            )
            .await?;

        Ok(result == 1)
    }

    /// Retrieve the earliest job from the queue.
    pub async fn pop(&self) -> Result<Option<QueuedJob>, Error> {
        let popped: Option<String> = self
            .pool
            .eval(
                POP_JOB_SCRIPT,
                vec![self.config.queue_name.clone()],
                Vec::<String>::new(),
            )
            .await?;

        let Some(payload) = popped else {
            return Ok(None);
        };

        match serde_json::from_str(&payload) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                // The payload is already off the queue; skipping it beats
                // wedging the dispatcher on a poisoned entry.
                tracing::warn!("Discarding malformed job payload from queue: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn len(&self) -> Result<u64, Error> {
        let count: u64 = self.pool.zcard(&self.config.queue_name).await?;
        Ok(count)
    }

    pub async fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len().await? == 0)
    }

    /// Remove all jobs older than the configured TTL from the queue.
    ///
    /// Runs periodically once [`WorkerQueue::start_cleanup`] is called, but
    /// can also be invoked manually for immediate cleanup.
    ///
    /// # Returns
    /// Returns the number of stale jobs that were removed from the queue.
    pub async fn cleanup_stale_jobs(&self) -> Result<u64, Error> {
        Self::cleanup_stale_jobs_internal(&self.pool, &self.config).await
    }

    async fn cleanup_stale_jobs_internal(
        pool: &Pool,
        config: &WorkerQueueConfig,
    ) -> Result<u64, Error> {
        let cutoff = Utc::now().timestamp_millis() - config.job_ttl.as_millis() as i64;

        let removed: i64 = pool
            .eval(
                CLEANUP_STALE_JOBS_SCRIPT,
                vec![config.queue_name.clone()],
                vec![cutoff.to_string()],
            )
            .await?;

        if removed > 0 {
            tracing::info!("Cleaned up {} stale jobs from queue", removed);
        }

        Ok(removed as u64)
    }

    /// Start the periodic stale-job cleanup task.
    ///
    /// Idempotent: calling it while the task is running is a no-op.
    pub async fn start_cleanup(&self) {
        let mut handle = self.cleanup_handle.write().await;
        if handle.is_some() {
            return;
        }

        let pool = self.pool.clone();
        let config = self.config.clone();
        let shutdown = Arc::clone(&self.cleanup_shutdown);

        *handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.cleanup_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown.notified() => break,

                    _ = interval.tick() => {
                        if let Err(e) = Self::cleanup_stale_jobs_internal(&pool, &config).await {
                            tracing::warn!("Failed to cleanup stale jobs: {}", e);
                        }
                    }
                }
            }
        }));
    }

    /// Stop the periodic cleanup task and wait for it to exit.
    pub async fn stop_cleanup(&self) {
        self.cleanup_shutdown.notify_one();

        if let Some(handle) = self.cleanup_handle.write().await.take() {
            let _ = handle.await;
        }
    }

    fn throttle_key(&self, identity: &str) -> String {
        format!("{}:throttle:{}", self.config.queue_name, identity)
    }
}
