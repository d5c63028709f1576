pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_show_id: String,
    pub apple_podcast_id: String,
    pub deezer_show_id: String,
    pub podcast_addict_id: String,
    pub pocketcasts_uuid: String,
    pub feed_url: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_access_token: Option<String>,
    pub s3_public_url: Option<String>,
    pub worker_concurrency: usize,
}

/// Default worker pool size; the pipeline is I/O bound and per-episode work
/// is cheap, so a small fixed pool is enough.
const DEFAULT_WORKER_CONCURRENCY: usize = 2;

impl Config {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
            redis_url: std::env::var("REDIS_URL")?,
            spotify_client_id: std::env::var("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: std::env::var("SPOTIFY_CLIENT_SECRET")?,
            spotify_show_id: std::env::var("SPOTIFY_SHOW_ID")?,
            apple_podcast_id: std::env::var("APPLE_PODCAST_ID")?,
            deezer_show_id: std::env::var("DEEZER_SHOW_ID")?,
            podcast_addict_id: std::env::var("PODCASTADDICT_PODCAST_ID")?,
            pocketcasts_uuid: std::env::var("POCKETCASTS_PODCAST_UUID")?,
            feed_url: std::env::var("CASTOPOD_FEED_URL")?,
            s3_endpoint: std::env::var("S3_ENDPOINT")?,
            s3_bucket: std::env::var("S3_BUCKET")?,
            s3_access_token: std::env::var("S3_ACCESS_TOKEN").ok(),
            s3_public_url: std::env::var("S3_PUBLIC_URL").ok(),
            worker_concurrency: std::env::var("WORKER_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WORKER_CONCURRENCY),
        })
    }
}
