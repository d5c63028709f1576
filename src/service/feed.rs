//! Feed reader seam.
//!
//! The RSS feed is an external collaborator: the pipeline only consumes the
//! already-parsed per-episode metadata plus the channel-level last-build
//! timestamp it uses as a staleness fingerprint. The page-rendering layer
//! owns the concrete implementation; everything in this crate programs
//! against the trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::feed::FeedError;

/// Episode metadata as read from the podcast feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeFeedData {
    pub title: String,
    /// Canonical release date the platform resolvers match against.
    pub release_date: NaiveDate,
    /// Episode cover art, source of the Open Graph preview image.
    pub cover_image_url: String,
    /// Channel-level last-build timestamp; `None` when the feed omits it.
    pub feed_last_build: Option<DateTime<Utc>>,
}

/// Bounded-timeout access to the podcast feed.
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetch metadata for one episode.
    ///
    /// Returns `Ok(None)` when the feed has no entry for the requested
    /// (season, episode) pair. A fetch failure is an error: it is the one
    /// upstream failure the page-view path surfaces, by falling back to a
    /// generic page.
    async fn fetch_episode(
        &self,
        season: i32,
        episode: i32,
    ) -> Result<Option<EpisodeFeedData>, FeedError>;
}
