//! Tests for WorkerQueue::submit throttling semantics.

use std::time::Duration;

use castlink_test_utils::RedisTest;

use crate::worker::resolve_job;

use super::setup_test_queue;

const WINDOW: Duration = Duration::from_secs(300);

#[tokio::test]
async fn test_submit_new_job_returns_id() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let result = queue.submit(resolve_job(2, 1), WINDOW).await;

    assert!(result.is_ok(), "Submit should succeed: {:?}", result);
    assert!(result.unwrap().is_some(), "First submit should schedule");

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_submit_same_key_throttled_within_window() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let first = queue.submit(resolve_job(3, 5), WINDOW).await.unwrap();
    let second = queue.submit(resolve_job(3, 5), WINDOW).await.unwrap();

    assert!(first.is_some(), "First submit should schedule");
    assert!(
        second.is_none(),
        "Second submit inside the window must be a no-op, not an error"
    );
    assert_eq!(
        queue.len().await.unwrap(),
        1,
        "Only one job should be queued"
    );

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_submit_different_keys_do_not_throttle_each_other() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let first = queue.submit(resolve_job(4, 1), WINDOW).await.unwrap();
    let second = queue.submit(resolve_job(4, 2), WINDOW).await.unwrap();

    assert!(first.is_some(), "Episode 4-1 should schedule");
    assert!(second.is_some(), "Episode 4-2 should schedule");
    assert_ne!(first, second, "Different jobs should have different IDs");

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_submit_same_key_allowed_after_window_expires() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);
    let window = Duration::from_millis(500);

    let first = queue.submit(resolve_job(5, 1), window).await.unwrap();
    assert!(first.is_some());

    tokio::time::sleep(Duration::from_millis(700)).await;

    // Throttle, not permanent dedup: the same key runs again once the
    // window has lapsed.
    let second = queue.submit(resolve_job(5, 1), window).await.unwrap();
    assert!(
        second.is_some(),
        "Submit after the window lapsed should schedule again"
    );

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_submit_rejects_invalid_episode_key() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let result = queue.submit(resolve_job(0, 1), WINDOW).await;

    assert!(result.is_err(), "Invalid episode keys must fail loudly");
    assert!(queue.is_empty().await.unwrap());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}
