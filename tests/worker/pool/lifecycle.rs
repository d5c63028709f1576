//! Tests for worker pool start/stop behavior and concurrency accounting.

use castlink::worker::{pool::WorkerPoolConfig, WorkerPool};
use castlink_test_utils::RedisTest;

use crate::worker::queue::setup_test_queue;

use super::setup_handler;

async fn setup_pool(redis: &RedisTest, max_concurrent_jobs: usize) -> WorkerPool {
    let queue = setup_test_queue(redis);
    let (handler, _db) = setup_handler("http://127.0.0.1:1").await;

    let mut config = WorkerPoolConfig::new(max_concurrent_jobs);
    config.poll_interval_ms = 10;
    config.shutdown_timeout_seconds = 2;

    WorkerPool::new(config, queue, handler)
}

#[tokio::test]
async fn test_start_and_stop() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let pool = setup_pool(&redis, 2).await;

    assert!(!pool.is_running().await, "Pool starts stopped");

    pool.start().await.expect("start should succeed");
    assert!(pool.is_running().await);
    assert_eq!(pool.dispatcher_count().await, 1);

    pool.stop().await.expect("stop should succeed");
    assert!(!pool.is_running().await);
    assert_eq!(pool.dispatcher_count().await, 0);

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let pool = setup_pool(&redis, 2).await;

    pool.start().await.unwrap();
    pool.start().await.unwrap();

    assert_eq!(
        pool.dispatcher_count().await,
        1,
        "Second start must not spawn extra dispatchers"
    );

    pool.stop().await.unwrap();
    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let pool = setup_pool(&redis, 2).await;

    pool.start().await.unwrap();
    pool.stop().await.unwrap();

    let result = pool.stop().await;
    assert!(result.is_ok(), "Stopping a stopped pool is a no-op");

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_permit_accounting_when_idle() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let pool = setup_pool(&redis, 3).await;

    assert_eq!(pool.max_concurrent_jobs(), 3);
    assert_eq!(pool.available_permits(), 3);
    assert_eq!(pool.active_job_count(), 0);

    redis.cleanup().await.expect("Failed to cleanup Redis");
}
