//! End-to-end test: a submitted job is drained from Redis and its results
//! land in the link cache.

use std::time::Duration;

use castlink::{
    data::episode_links::EpisodeLinksRepository,
    model::worker::WorkerJob,
    worker::{pool::WorkerPoolConfig, WorkerPool},
};
use castlink_test_utils::{
    fixtures::platform::{
        mock_apple_lookup_endpoint, mock_deezer_episodes_endpoint, mock_spotify_episodes_endpoint,
        mock_spotify_token_endpoint, TEST_DEEZER_SHOW_ID, TEST_SPOTIFY_SHOW_ID,
    },
    RedisTest,
};
use chrono::NaiveDate;

use crate::worker::queue::setup_test_queue;

use super::setup_handler;

#[tokio::test]
async fn test_pool_processes_submitted_job() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_spotify_token_endpoint(&mut server, 1);
    let _spotify = mock_spotify_episodes_endpoint(
        &mut server,
        TEST_SPOTIFY_SHOW_ID,
        &[("2025-10-27", "https://open.spotify.com/episode/oct")],
    );
    let _apple = mock_apple_lookup_endpoint(
        &mut server,
        &[("2025-10-27", "https://podcasts.apple.com/ep/oct")],
    );
    let _deezer = mock_deezer_episodes_endpoint(
        &mut server,
        TEST_DEEZER_SHOW_ID,
        &[("2025-10-27", 711001)],
    );

    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_test_queue(&redis);
    let (handler, db) = setup_handler(&server.url()).await;

    let mut config = WorkerPoolConfig::new(2);
    config.poll_interval_ms = 10;
    config.shutdown_timeout_seconds = 2;
    let pool = WorkerPool::new(config, queue.clone(), handler);

    pool.start().await.expect("pool should start");

    let job = WorkerJob::ResolveEpisode {
        season: 2,
        episode: 1,
        title: "End to end".to_string(),
        release_date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
        // Unreachable cover: preview failure must not keep links from landing.
        cover_image_url: "http://127.0.0.1:1/cover.jpg".to_string(),
        feed_last_build: None,
    };
    queue
        .submit(job, Duration::from_secs(300))
        .await
        .unwrap()
        .expect("job should schedule");

    let repo = EpisodeLinksRepository::new(&db);
    let mut row = None;
    for _ in 0..100 {
        if let Some(found) = repo.get_by_key(2, 1).await.unwrap() {
            row = Some(found);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    pool.stop().await.expect("pool should stop");
    redis.cleanup().await.expect("Failed to cleanup Redis");

    let row = row.expect("worker should persist the resolution within 10s");
    assert_eq!(
        row.spotify_url.as_deref(),
        Some("https://open.spotify.com/episode/oct")
    );
    assert_eq!(
        row.apple_url.as_deref(),
        Some("https://podcasts.apple.com/ep/oct")
    );
    assert_eq!(
        row.deezer_url.as_deref(),
        Some("https://www.deezer.com/fr/episode/711001")
    );
    assert!(queue.is_empty().await.unwrap(), "Queue should be drained");
}
