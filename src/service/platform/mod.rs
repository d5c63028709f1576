//! Platform deep-link resolution.
//!
//! One resolver per external podcast platform. Each performs a single
//! limited-window search of the show's catalog and matches episodes by exact
//! calendar day against the canonical release date from the feed; no match
//! and non-2xx catalog responses both collapse to `None`. Only transport
//! failures surface as errors, and the worker's fan-out contains those
//! per-platform.

pub mod apple;
pub mod deezer;
pub mod links;
pub mod spotify;

pub use apple::AppleResolver;
pub use deezer::DeezerResolver;
pub use spotify::SpotifyResolver;

use chrono::NaiveDate;

use crate::config::Config;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_URL: &str = "https://api.spotify.com";
const APPLE_API_URL: &str = "https://itunes.apple.com";
const DEEZER_API_URL: &str = "https://api.deezer.com";

/// Everything the resolvers and link builders need to know about the show's
/// presence on each platform. Base URLs are separate fields so tests can
/// point a resolver at a local mock server.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_show_id: String,
    pub apple_api_url: String,
    pub apple_podcast_id: String,
    pub deezer_api_url: String,
    pub deezer_show_id: String,
    pub podcast_addict_id: String,
    pub pocketcasts_uuid: String,
    pub feed_url: String,
}

impl PlatformConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            spotify_token_url: SPOTIFY_TOKEN_URL.to_string(),
            spotify_api_url: SPOTIFY_API_URL.to_string(),
            spotify_client_id: config.spotify_client_id.clone(),
            spotify_client_secret: config.spotify_client_secret.clone(),
            spotify_show_id: config.spotify_show_id.clone(),
            apple_api_url: APPLE_API_URL.to_string(),
            apple_podcast_id: config.apple_podcast_id.clone(),
            deezer_api_url: DEEZER_API_URL.to_string(),
            deezer_show_id: config.deezer_show_id.clone(),
            podcast_addict_id: config.podcast_addict_id.clone(),
            pocketcasts_uuid: config.pocketcasts_uuid.clone(),
            feed_url: config.feed_url.clone(),
        }
    }
}

/// Date component of a platform timestamp.
///
/// Apple returns `2025-10-27T07:00:00Z`, Deezer `2025-10-27 07:00:00`,
/// Spotify a plain `2025-10-27`; all compare through this.
fn date_part(timestamp: &str) -> &str {
    timestamp
        .split(['T', ' '])
        .next()
        .unwrap_or(timestamp)
}

fn format_release_date(release_date: NaiveDate) -> String {
    release_date.format("%Y-%m-%d").to_string()
}
