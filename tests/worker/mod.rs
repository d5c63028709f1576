pub mod pool;
pub mod queue;

use castlink::model::worker::WorkerJob;
use chrono::NaiveDate;

/// A resolve job with fixed metadata; only the episode key matters to the
/// queue's dedup behavior.
pub fn resolve_job(season: i32, episode: i32) -> WorkerJob {
    WorkerJob::ResolveEpisode {
        season,
        episode,
        title: format!("Episode {}-{}", season, episode),
        release_date: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
        cover_image_url: "https://example.com/cover.jpg".to_string(),
        feed_last_build: None,
    }
}
