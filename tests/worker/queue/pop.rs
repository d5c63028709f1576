//! Tests for WorkerQueue::pop ordering and payload fidelity.

use std::time::Duration;

use castlink_test_utils::RedisTest;

use crate::worker::resolve_job;

use super::setup_test_queue;

const WINDOW: Duration = Duration::from_secs(300);

#[tokio::test]
async fn test_pop_empty_queue_returns_none() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let result = queue.pop().await;

    assert!(result.is_ok(), "Pop should succeed on empty queue");
    assert!(result.unwrap().is_none());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_pop_returns_earliest_job_first() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    queue.submit(resolve_job(6, 1), WINDOW).await.unwrap();
    // Submit timestamps are millisecond scores; keep them distinct.
    tokio::time::sleep(Duration::from_millis(10)).await;
    queue.submit(resolve_job(6, 2), WINDOW).await.unwrap();

    let first = queue.pop().await.unwrap().expect("first job");
    let second = queue.pop().await.unwrap().expect("second job");

    assert_eq!(first.job, resolve_job(6, 1), "Oldest job should pop first");
    assert_eq!(second.job, resolve_job(6, 2));
    assert!(queue.pop().await.unwrap().is_none());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_pop_roundtrips_payload_and_id() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);

    let job = resolve_job(7, 3);
    let submitted_id = queue
        .submit(job.clone(), WINDOW)
        .await
        .unwrap()
        .expect("job should schedule");

    let popped = queue.pop().await.unwrap().expect("job should pop");

    assert_eq!(popped.id, submitted_id, "Popped id must match submit's id");
    assert_eq!(popped.job, job, "Payload must survive the queue unchanged");

    redis.cleanup().await.expect("Failed to cleanup Redis");
}
