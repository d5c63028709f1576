//! Page-view enqueue path: decide whether the cached links are stale and,
//! if so, submit a throttled resolution job.
//!
//! This runs inline with page rendering, so it only reads and submits; the
//! actual resolution work happens later in the worker pool.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    data::episode_links::EpisodeLinksRepository,
    error::Error,
    model::worker::WorkerJob,
    service::feed::FeedReader,
    worker::queue::WorkerQueue,
};

/// Repeated submissions for the same episode inside this window are no-ops.
pub const RESOLVE_THROTTLE_WINDOW: Duration = Duration::from_secs(300);

/// Fallback staleness net: previews older than this are regenerated even
/// when the feed fingerprint never moved.
pub const PREVIEW_MAX_AGE_DAYS: i64 = 7;

/// Decide whether an episode's cached resolution should be refreshed.
///
/// Rules in order, first match wins:
/// 1. nothing resolved yet (no links, no preview) → refresh
/// 2. the live feed fingerprint is strictly newer than the cached one →
///    refresh (the episode changed upstream)
/// 3. the preview is older than [`PREVIEW_MAX_AGE_DAYS`] → refresh
/// 4. otherwise → keep the cache
///
/// Pure: the clock is an argument, there is no I/O.
pub fn needs_refresh(
    has_links: bool,
    cached_fingerprint: Option<DateTime<Utc>>,
    preview_generated_at: Option<DateTime<Utc>>,
    live_fingerprint: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if !has_links && preview_generated_at.is_none() {
        return true;
    }

    if let (Some(cached), Some(live)) = (cached_fingerprint, live_fingerprint) {
        if live > cached {
            return true;
        }
    }

    if let Some(generated_at) = preview_generated_at {
        if now - generated_at > chrono::Duration::days(PREVIEW_MAX_AGE_DAYS) {
            return true;
        }
    }

    false
}

pub struct EnqueueService<'a> {
    db: &'a DatabaseConnection,
    queue: &'a WorkerQueue,
    feed: &'a dyn FeedReader,
}

impl<'a> EnqueueService<'a> {
    pub fn new(db: &'a DatabaseConnection, queue: &'a WorkerQueue, feed: &'a dyn FeedReader) -> Self {
        Self { db, queue, feed }
    }

    /// Schedule a resolution job for the episode when its cache is stale.
    ///
    /// Returns the scheduled job id, or `None` when the cache is fresh or an
    /// identical job was already submitted inside the throttle window. Feed
    /// and queue failures propagate; the page-view caller skips the refresh
    /// and renders whatever is cached.
    pub async fn refresh_if_stale(
        &self,
        season: i32,
        episode: i32,
    ) -> Result<Option<Uuid>, Error> {
        let Some(feed_data) = self.feed.fetch_episode(season, episode).await? else {
            tracing::debug!(
                "No feed entry for s{}e{}, nothing to resolve",
                season,
                episode
            );
            return Ok(None);
        };

        let row = EpisodeLinksRepository::new(self.db)
            .get_by_key(season, episode)
            .await?;

        let refresh = match &row {
            None => true,
            // A missing primary link always retries, whatever the fingerprints say.
            Some(row) if row.spotify_url.is_none() => true,
            Some(row) => needs_refresh(
                row.spotify_url.is_some()
                    || row.apple_url.is_some()
                    || row.deezer_url.is_some(),
                row.feed_last_build.map(|t| t.and_utc()),
                row.generated_at.map(|t| t.and_utc()),
                feed_data.feed_last_build,
                Utc::now(),
            ),
        };

        if !refresh {
            return Ok(None);
        }

        let job = WorkerJob::ResolveEpisode {
            season,
            episode,
            title: feed_data.title,
            release_date: feed_data.release_date,
            cover_image_url: feed_data.cover_image_url,
            feed_last_build: feed_data.feed_last_build,
        };

        let job_id = self.queue.submit(job, RESOLVE_THROTTLE_WINDOW).await?;

        if let Some(id) = job_id {
            tracing::debug!("Scheduled resolution job {} for s{}e{}", id, season, episode);
        }

        Ok(job_id)
    }
}
