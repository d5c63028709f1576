//! Worker-side orchestration of one episode resolution.
//!
//! Runs the three pipeline steps in order: best-effort preview image
//! regeneration, concurrent platform fan-out, and the atomic merge-upsert
//! into the link cache. Every upstream failure is contained at its own step;
//! a job only reports failure for defects worth a retry-by-hand, never for a
//! platform having a bad day.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::episode_links::{EpisodeLinksRepository, EpisodeLinksUpdate},
    error::{platform::PlatformError, Error},
    model::episode::EpisodeKey,
    service::{
        og_image,
        platform::{AppleResolver, DeezerResolver, SpotifyResolver},
    },
    store::BlobStore,
};

/// A freshly uploaded preview image, ready to be recorded on the row.
struct PreviewUpload {
    url: String,
    storage_key: String,
    feed_last_build: Option<DateTime<Utc>>,
    generated_at: DateTime<Utc>,
}

pub struct ResolutionService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
    spotify: &'a SpotifyResolver,
    apple: &'a AppleResolver,
    deezer: &'a DeezerResolver,
    blob_store: &'a dyn BlobStore,
}

impl<'a> ResolutionService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http: &'a reqwest::Client,
        spotify: &'a SpotifyResolver,
        apple: &'a AppleResolver,
        deezer: &'a DeezerResolver,
        blob_store: &'a dyn BlobStore,
    ) -> Self {
        Self {
            db,
            http,
            spotify,
            apple,
            deezer,
            blob_store,
        }
    }

    /// Resolve one episode and merge the results into the link cache.
    ///
    /// Safe to re-run at any time: the upsert is atomic per episode and the
    /// merge never regresses known-good fields, so at-least-once delivery
    /// and concurrent workers on the same key are both fine.
    pub async fn resolve_episode(
        &self,
        key: EpisodeKey,
        release_date: NaiveDate,
        cover_image_url: &str,
        feed_last_build: Option<DateTime<Utc>>,
    ) -> Result<(), Error> {
        let preview = self
            .regenerate_preview(key, cover_image_url, feed_last_build)
            .await;

        let (spotify, apple, deezer) = tokio::join!(
            self.spotify.resolve(release_date),
            self.apple.resolve(release_date),
            self.deezer.resolve(release_date),
        );
        let spotify_url = settle(key, "spotify", spotify);
        let apple_url = settle(key, "apple", apple);
        let deezer_url = settle(key, "deezer", deezer);

        let update = EpisodeLinksUpdate {
            spotify_url,
            apple_url,
            deezer_url,
            og_image_url: preview.as_ref().map(|p| p.url.clone()),
            og_storage_key: preview.as_ref().map(|p| p.storage_key.clone()),
            feed_last_build: preview
                .as_ref()
                .and_then(|p| p.feed_last_build)
                .map(|t| t.naive_utc()),
            generated_at: preview.as_ref().map(|p| p.generated_at.naive_utc()),
        };

        // A failed write is not retried here: nothing was saved, so the next
        // page view's staleness check schedules the episode again.
        if let Err(e) = EpisodeLinksRepository::new(self.db)
            .upsert(key.season, key.episode, update)
            .await
        {
            tracing::error!("Failed to persist resolution for {}: {:?}", key, e);
        }

        Ok(())
    }

    /// Regenerate and upload the episode's preview image, best-effort.
    ///
    /// Returns `None` on any failure; the rest of the pipeline proceeds
    /// without preview fields. A failed delete of the superseded blob only
    /// logs: an orphaned blob is acceptable, a dangling DB reference is not,
    /// so the new upload always goes ahead.
    async fn regenerate_preview(
        &self,
        key: EpisodeKey,
        cover_image_url: &str,
        feed_last_build: Option<DateTime<Utc>>,
    ) -> Option<PreviewUpload> {
        let bytes = match og_image::generate_og_image(self.http, cover_image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Preview generation failed for {}: {}", key, e);
                return None;
            }
        };

        match EpisodeLinksRepository::new(self.db)
            .get_by_key(key.season, key.episode)
            .await
        {
            Ok(Some(existing)) => {
                if let Some(old_key) = existing.og_storage_key {
                    if let Err(e) = self.blob_store.delete(&old_key).await {
                        tracing::warn!(
                            "Failed to delete superseded preview {} for {}: {}",
                            old_key,
                            key,
                            e
                        );
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Could not look up previous preview key for {}: {:?}", key, e);
            }
        }

        let storage_key = key.storage_key();
        let url = match self
            .blob_store
            .put(&storage_key, bytes, "image/png")
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Preview upload failed for {}: {}", key, e);
                return None;
            }
        };

        Some(PreviewUpload {
            url,
            storage_key,
            feed_last_build,
            generated_at: Utc::now(),
        })
    }
}

/// Collapse one platform's outcome to an optional URL.
///
/// Resolver errors are logged and mapped to `None` so a single platform
/// failure can neither cancel the other resolutions nor fail the job.
fn settle(
    key: EpisodeKey,
    platform: &str,
    result: Result<Option<String>, PlatformError>,
) -> Option<String> {
    match result {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("{} resolution failed for {}: {}", platform, key, e);
            None
        }
    }
}
