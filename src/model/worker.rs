//! Worker job definitions for background task processing.
//!
//! Jobs are serialized to JSON for Redis storage and deserialized by the
//! worker pool for processing. Each variant carries the minimal data the
//! handler needs so a job can run without re-reading the feed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{error::worker::WorkerError, model::episode::EpisodeKey};

/// A job as stored in the queue: the payload plus the id handed back to the
/// submitter, so logs on both sides of the queue can be correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedJob {
    pub id: Uuid,
    pub job: WorkerJob,
}

impl QueuedJob {
    pub fn new(job: WorkerJob) -> Self {
        Self {
            id: Uuid::new_v4(),
            job,
        }
    }
}

impl fmt::Display for QueuedJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.job, self.id)
    }
}

/// Background job types for the episode-resolution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WorkerJob {
    /// Resolve cross-platform deep links and regenerate the Open Graph
    /// preview image for one episode.
    ///
    /// Created by the page-view enqueue path when the cached links are
    /// stale or absent. Safe to deliver more than once: the handler's
    /// persistence is an atomic merge-upsert, so re-running only refreshes
    /// the same row.
    ResolveEpisode {
        season: i32,
        episode: i32,
        /// Episode title from the feed, carried for logging only.
        title: String,
        /// Canonical release date the platform resolvers match against.
        release_date: NaiveDate,
        /// Cover art URL the preview image is composed from.
        cover_image_url: String,
        /// The feed's last-build timestamp at enqueue time, persisted as the
        /// preview's staleness fingerprint.
        feed_last_build: Option<DateTime<Utc>>,
    },
}

impl WorkerJob {
    pub fn episode_key(&self) -> EpisodeKey {
        match self {
            WorkerJob::ResolveEpisode {
                season, episode, ..
            } => EpisodeKey::new(*season, *episode),
        }
    }

    /// Dedup identity used for submit-time throttling.
    ///
    /// Derived from the episode key alone: two submissions for the same
    /// episode are the same work no matter what metadata they carry.
    ///
    /// # Returns
    ///
    /// Returns `Err` when the episode key is invalid (non-positive season or
    /// episode), which indicates the caller built the job from unvalidated
    /// input.
    pub fn identity(&self) -> Result<String, WorkerError> {
        let key = self.episode_key();

        if !key.is_valid() {
            return Err(WorkerError::InvalidEpisodeKey {
                season: key.season,
                episode: key.episode,
            });
        }

        Ok(key.dedup_key())
    }
}

impl fmt::Display for WorkerJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerJob::ResolveEpisode {
                season,
                episode,
                title,
                release_date,
                ..
            } => write!(
                f,
                "ResolveEpisode {{ s{}e{} \"{}\" released {} }}",
                season, episode, title, release_date
            ),
        }
    }
}
