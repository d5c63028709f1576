//! Tests for the page-view enqueue path against a real queue.

use async_trait::async_trait;
use castlink::{
    data::episode_links::{EpisodeLinksRepository, EpisodeLinksUpdate},
    error::feed::FeedError,
    service::{
        enqueue::EnqueueService,
        feed::{EpisodeFeedData, FeedReader},
    },
    worker::{queue::WorkerQueueConfig, WorkerQueue},
};
use castlink_test_utils::{db, RedisTest};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Feed double that answers from a fixed entry for one (season, episode).
struct StaticFeedReader {
    season: i32,
    episode: i32,
    data: EpisodeFeedData,
}

#[async_trait]
impl FeedReader for StaticFeedReader {
    async fn fetch_episode(
        &self,
        season: i32,
        episode: i32,
    ) -> Result<Option<EpisodeFeedData>, FeedError> {
        if season == self.season && episode == self.episode {
            Ok(Some(self.data.clone()))
        } else {
            Ok(None)
        }
    }
}

fn feed_last_build() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 27, 9, 30, 0).unwrap()
}

fn feed_for(season: i32, episode: i32) -> StaticFeedReader {
    StaticFeedReader {
        season,
        episode,
        data: EpisodeFeedData {
            title: "Enqueue Test".to_string(),
            release_date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
            cover_image_url: "https://example.com/cover.jpg".to_string(),
            feed_last_build: Some(feed_last_build()),
        },
    }
}

fn setup_queue(redis: &RedisTest) -> WorkerQueue {
    let config = WorkerQueueConfig {
        queue_name: redis.queue_name(),
        ..Default::default()
    };
    WorkerQueue::with_config(redis.redis_pool.clone(), config)
}

#[tokio::test]
async fn test_unresolved_episode_schedules_once_per_window() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_queue(&redis);
    let db = db::connect_with_schema().await.unwrap();
    let feed = feed_for(2, 1);
    let service = EnqueueService::new(&db, &queue, &feed);

    let first = service.refresh_if_stale(2, 1).await.unwrap();
    let second = service.refresh_if_stale(2, 1).await.unwrap();

    assert!(first.is_some(), "First page view should schedule a job");
    assert!(
        second.is_none(),
        "Second page view inside the window is throttled"
    );
    assert_eq!(queue.len().await.unwrap(), 1);

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_fresh_cache_does_not_schedule() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_queue(&redis);
    let db = db::connect_with_schema().await.unwrap();

    EpisodeLinksRepository::new(&db)
        .upsert(
            2,
            1,
            EpisodeLinksUpdate {
                spotify_url: Some("https://open.spotify.com/episode/a".to_string()),
                apple_url: Some("https://podcasts.apple.com/ep/a".to_string()),
                deezer_url: Some("https://www.deezer.com/fr/episode/1".to_string()),
                og_image_url: Some("https://cdn.example.com/og-images/s2e1.png".to_string()),
                og_storage_key: Some("og-images/s2e1.png".to_string()),
                feed_last_build: Some(feed_last_build().naive_utc()),
                generated_at: Some(Utc::now().naive_utc()),
            },
        )
        .await
        .unwrap();

    let feed = feed_for(2, 1);
    let service = EnqueueService::new(&db, &queue, &feed);

    let result = service.refresh_if_stale(2, 1).await.unwrap();

    assert!(result.is_none(), "Fresh cache must not schedule work");
    assert!(queue.is_empty().await.unwrap());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_missing_primary_link_always_schedules() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_queue(&redis);
    let db = db::connect_with_schema().await.unwrap();

    // Fresh fingerprints and preview, but Spotify never resolved.
    EpisodeLinksRepository::new(&db)
        .upsert(
            2,
            1,
            EpisodeLinksUpdate {
                apple_url: Some("https://podcasts.apple.com/ep/a".to_string()),
                og_image_url: Some("https://cdn.example.com/og-images/s2e1.png".to_string()),
                og_storage_key: Some("og-images/s2e1.png".to_string()),
                feed_last_build: Some(feed_last_build().naive_utc()),
                generated_at: Some(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let feed = feed_for(2, 1);
    let service = EnqueueService::new(&db, &queue, &feed);

    let result = service.refresh_if_stale(2, 1).await.unwrap();

    assert!(
        result.is_some(),
        "Partial resolution must retry while the primary link is missing"
    );

    redis.cleanup().await.expect("Failed to cleanup Redis");
}

#[tokio::test]
async fn test_unknown_episode_does_nothing() {
    let redis = RedisTest::new().await.expect("Failed to create Redis test");
    let queue = setup_queue(&redis);
    let db = db::connect_with_schema().await.unwrap();
    let feed = feed_for(2, 1);
    let service = EnqueueService::new(&db, &queue, &feed);

    let result = service.refresh_if_stale(9, 9).await.unwrap();

    assert!(result.is_none(), "No feed entry, nothing to resolve");
    assert!(queue.is_empty().await.unwrap());

    redis.cleanup().await.expect("Failed to cleanup Redis");
}
