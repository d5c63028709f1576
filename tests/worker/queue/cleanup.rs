//! Tests for stale-job cleanup and queue length reporting.

use std::time::Duration;

use castlink::worker::{queue::WorkerQueueConfig, WorkerQueue};
use castlink_test_utils::RedisTest;

use crate::worker::resolve_job;

use super::setup_test_queue;

const WINDOW: Duration = Duration::from_secs(300);

fn setup_short_ttl_queue(redis: &RedisTest) -> WorkerQueue {
    let config = WorkerQueueConfig {
        queue_name: redis.queue_name(),
        job_ttl: Duration::from_millis(100),
        cleanup_interval: Duration::from_secs(3600),
    };

    WorkerQueue::with_config(redis.redis_pool.clone(), config)
}

#[tokio::test]
async fn test_cleanup_removes_jobs_older_than_ttl() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_short_ttl_queue(&redis);

    queue.submit(resolve_job(8, 1), WINDOW).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let removed = queue.cleanup_stale_jobs().await.unwrap();

    assert_eq!(removed, 1, "The expired job should be removed");
    assert!(queue.is_empty().await.unwrap());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_cleanup_keeps_fresh_jobs() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    queue.submit(resolve_job(8, 2), WINDOW).await.unwrap();

    let removed = queue.cleanup_stale_jobs().await.unwrap();

    assert_eq!(removed, 0, "Fresh jobs must survive cleanup");
    assert_eq!(queue.len().await.unwrap(), 1);

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_len_tracks_submissions() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    assert!(queue.is_empty().await.unwrap());

    queue.submit(resolve_job(9, 1), WINDOW).await.unwrap();
    queue.submit(resolve_job(9, 2), WINDOW).await.unwrap();

    assert_eq!(queue.len().await.unwrap(), 2);

    redis.cleanup().await.expect("Failed to cleanup Redis");
}
