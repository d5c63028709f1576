use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    error::Error,
    model::worker::WorkerJob,
    service::{
        platform::{AppleResolver, DeezerResolver, PlatformConfig, SpotifyResolver},
        resolution::ResolutionService,
    },
    store::BlobStore,
};

/// Handler for processing worker jobs from the queue.
///
/// Owns the long-lived pieces every job shares: the database connection, the
/// HTTP client, the platform resolvers (including Spotify's process-scoped
/// token state) and the blob store. Each job type has a corresponding method
/// with the specific business logic.
pub struct WorkerJobHandler {
    db: DatabaseConnection,
    http: reqwest::Client,
    spotify: SpotifyResolver,
    apple: AppleResolver,
    deezer: DeezerResolver,
    blob_store: Arc<dyn BlobStore>,
}

impl WorkerJobHandler {
    /// Create a new WorkerJobHandler.
    pub fn new(
        db: DatabaseConnection,
        http: reqwest::Client,
        platforms: &PlatformConfig,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            spotify: SpotifyResolver::new(http.clone(), platforms),
            apple: AppleResolver::new(http.clone(), platforms),
            deezer: DeezerResolver::new(http.clone(), platforms),
            db,
            http,
            blob_store,
        }
    }

    /// Handle a worker job by delegating to the appropriate handler method.
    ///
    /// This is the main entry point for job processing. It dispatches the job
    /// to the correct handler method based on the job type.
    pub async fn handle(&self, job: &WorkerJob) -> Result<(), Error> {
        match job {
            WorkerJob::ResolveEpisode {
                release_date,
                cover_image_url,
                feed_last_build,
                ..
            } => {
                let key = job.episode_key();

                if !key.is_valid() {
                    // A malformed job is a producer bug; skipping beats
                    // taking the worker pool down over it.
                    tracing::warn!("Skipping resolve job with invalid episode key {}", key);
                    return Ok(());
                }

                tracing::debug!("Processing episode resolution for {}", key);

                ResolutionService::new(
                    &self.db,
                    &self.http,
                    &self.spotify,
                    &self.apple,
                    &self.deezer,
                    self.blob_store.as_ref(),
                )
                .resolve_episode(key, *release_date, cover_image_url, *feed_last_build)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to resolve episode {}: {:?}", key, e);
                    e
                })?;

                tracing::debug!("Successfully processed resolution for {}", key);

                Ok(())
            }
        }
    }
}
