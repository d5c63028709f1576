//! Worker pool for processing background jobs with concurrency control.
//!
//! This module provides the `WorkerPool` that manages dispatcher tasks, job
//! execution, and concurrency limits using semaphores. The pool polls Redis
//! for jobs and spawns tasks to process them with configurable timeout and
//! shutdown behavior.

mod config;

pub use config::WorkerPoolConfig;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock, Semaphore};
use tokio::task::JoinHandle;

use crate::{
    error::Error,
    model::worker::QueuedJob,
    worker::{handler::WorkerJobHandler, queue::WorkerQueue},
};

/// Worker pool for processing jobs from the [`WorkerQueue`].
///
/// Manages dispatcher tasks that poll Redis for jobs and spawn execution
/// tasks with semaphore-based concurrency control. Provides graceful
/// shutdown; in-flight jobs run to completion.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<WorkerPoolRef>,
}

struct WorkerPoolRef {
    config: WorkerPoolConfig,
    queue: WorkerQueue,
    handler: Arc<WorkerJobHandler>,
    semaphore: Arc<Semaphore>,
    shutdown: Arc<Notify>,
    dispatcher_handles: RwLock<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Creates a new worker pool in a stopped state.
    pub fn new(config: WorkerPoolConfig, queue: WorkerQueue, handler: WorkerJobHandler) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs));
        let shutdown = Arc::new(Notify::new());

        Self {
            inner: Arc::new(WorkerPoolRef {
                config,
                handler: Arc::new(handler),
                queue,
                semaphore,
                shutdown,
                dispatcher_handles: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Starts the worker pool.
    ///
    /// Spawns the configured number of dispatcher tasks and the queue's
    /// stale-job cleanup task. Non-blocking and idempotent: calling it when
    /// already running logs a warning and returns Ok.
    pub async fn start(&self) -> Result<(), Error> {
        let mut handles = self.inner.dispatcher_handles.write().await;

        if !handles.is_empty() {
            tracing::warn!("Worker pool is already running");
            return Ok(());
        }

        tracing::info!(
            "Starting worker pool with {} dispatcher(s) (max {} concurrent jobs)",
            self.inner.config.dispatcher_count,
            self.inner.config.max_concurrent_jobs
        );

        self.inner.queue.start_cleanup().await;

        for id in 0..self.inner.config.dispatcher_count {
            let handle = self.spawn_dispatcher(id);
            handles.push(handle);
        }

        Ok(())
    }

    /// Spawns a single dispatcher task that polls the queue until shutdown.
    fn spawn_dispatcher(&self, id: usize) -> JoinHandle<()> {
        let config = self.inner.config.clone();
        let queue = self.inner.queue.clone();
        let handler = Arc::clone(&self.inner.handler);
        let semaphore = Arc::clone(&self.inner.semaphore);
        let shutdown = Arc::clone(&self.inner.shutdown);

        tokio::spawn(async move {
            tracing::info!("Dispatcher {} started", id);

            loop {
                tokio::select! {
                    // Biased select ensures the shutdown signal is prioritized
                    // over processing new jobs.
                    biased;

                    _ = shutdown.notified() => {
                        tracing::debug!("Dispatcher {} received shutdown signal", id);
                        break;
                    }

                    _ = Self::process_jobs(
                        id,
                        &config,
                        &queue,
                        &handler,
                        &semaphore,
                    ) => {
                        // Continue to next iteration
                    }
                }
            }

            tracing::info!("Dispatcher {} stopped", id);
        })
    }

    /// Polls the queue once and spawns a task for the popped job, if any.
    ///
    /// Blocks on the semaphore when at capacity, sleeps when the queue is
    /// empty, backs off on queue errors, and returns jobs to the queue when
    /// the semaphore is closed (shutting down).
    async fn process_jobs(
        dispatcher_id: usize,
        config: &WorkerPoolConfig,
        queue: &WorkerQueue,
        handler: &Arc<WorkerJobHandler>,
        semaphore: &Arc<Semaphore>,
    ) {
        match queue.pop().await {
            Ok(Some(job)) => {
                match semaphore.clone().acquire_owned().await {
                    Ok(permit) => {
                        let handler = Arc::clone(handler);
                        let timeout = config.job_timeout();

                        tokio::spawn(async move {
                            Self::execute_job(job, handler, timeout, permit).await;
                        });
                    }
                    Err(_) => {
                        // Semaphore closed (shutting down), push the job back.
                        if let Err(e) = queue.requeue(job).await {
                            tracing::error!(
                                "Dispatcher {} failed to return job to queue: {:?}",
                                dispatcher_id,
                                e
                            );
                        }
                    }
                }
            }
            Ok(None) => {
                tokio::time::sleep(config.poll_interval()).await;
            }
            Err(e) => {
                tracing::error!("Dispatcher {} queue error: {:?}", dispatcher_id, e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    /// Executes a job with a timeout; the semaphore permit is held until the
    /// job finishes, which is what limits concurrency.
    async fn execute_job(
        job: QueuedJob,
        handler: Arc<WorkerJobHandler>,
        timeout: Duration,
        _permit: tokio::sync::OwnedSemaphorePermit,
    ) {
        let result = tokio::time::timeout(timeout, handler.handle(&job.job)).await;

        match result {
            Ok(Ok(())) => {
                tracing::debug!("Job completed: {}", job);
            }
            Ok(Err(e)) => {
                tracing::error!("Job failed: {}, error: {:?}", job, e);
            }
            Err(_) => {
                tracing::error!("Job timed out after {} seconds: {}", timeout.as_secs(), job);
            }
        }
    }

    /// Stops the worker pool gracefully.
    ///
    /// Signals all dispatchers, closes the semaphore so no new jobs start,
    /// stops the queue cleanup task, and joins the dispatchers with a
    /// timeout. In-flight job tasks continue to completion. Idempotent.
    pub async fn stop(&self) -> Result<(), Error> {
        if !self.is_running().await {
            tracing::debug!("Worker pool is already stopped");
            return Ok(());
        }

        tracing::info!("Shutting down worker pool...");

        self.inner.semaphore.close();
        self.inner.shutdown.notify_waiters();
        self.inner.queue.stop_cleanup().await;

        let mut handles = self.inner.dispatcher_handles.write().await;
        let dispatcher_count = handles.len();

        for (i, handle) in handles.drain(..).enumerate() {
            let timeout_result =
                tokio::time::timeout(self.inner.config.shutdown_timeout(), handle).await;

            match timeout_result {
                Ok(Ok(())) => {
                    tracing::debug!("Dispatcher {} stopped cleanly", i);
                }
                Ok(Err(e)) => {
                    tracing::error!("Dispatcher {} panicked: {:?}", i, e);
                }
                Err(_) => {
                    tracing::warn!("Dispatcher {} did not stop within timeout", i);
                }
            }
        }

        tracing::info!(
            "Worker pool shut down ({} dispatchers stopped, in-flight tasks will complete)",
            dispatcher_count
        );

        Ok(())
    }

    /// Whether the pool has active dispatchers.
    pub async fn is_running(&self) -> bool {
        let handles = self.inner.dispatcher_handles.read().await;
        !handles.is_empty()
    }

    /// Number of dispatcher tasks currently running.
    pub async fn dispatcher_count(&self) -> usize {
        let handles = self.inner.dispatcher_handles.read().await;
        handles.len()
    }

    /// Number of jobs that can still start before hitting the concurrency
    /// limit; 0 means the pool is at capacity.
    pub fn available_permits(&self) -> usize {
        self.inner.semaphore.available_permits()
    }

    /// Maximum number of concurrent jobs configured.
    pub fn max_concurrent_jobs(&self) -> usize {
        self.inner.config.max_concurrent_jobs
    }

    /// Number of jobs currently executing.
    pub fn active_job_count(&self) -> usize {
        self.inner.config.max_concurrent_jobs - self.inner.semaphore.available_permits()
    }
}
