//! Deterministic link builders for platforms without a search API.
//!
//! Podcast Addict deep links are derived from the episode's audio URL, and
//! the show-level fallback links cover every platform for the generic page
//! shown while an episode is still unresolved.

use crate::{error::platform::PlatformError, service::platform::PlatformConfig};

/// Build the Podcast Addict deep link for an episode's audio URL.
pub fn build_podcast_addict_link(
    audio_url: &str,
    podcast_id: &str,
) -> Result<String, PlatformError> {
    if audio_url.trim().is_empty() {
        return Err(PlatformError::MissingAudioUrl);
    }

    Ok(format!(
        "https://podcastaddict.com/episode/{}&podcastId={}",
        urlencoding::encode(audio_url),
        podcast_id
    ))
}

/// Show-level links for every supported platform.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackLinks {
    pub spotify: String,
    pub apple: String,
    pub deezer: String,
    pub podcast_addict: String,
    pub antennapod: String,
    pub pocket_casts: String,
    pub overcast: String,
    pub castopod: String,
}

/// Build the non-episode-specific platform links for the show.
///
/// Used whenever an episode's own links are not (yet) resolved; apps that
/// subscribe straight from RSS (AntennaPod, Castopod) get the feed URL.
pub fn build_fallback_links(config: &PlatformConfig) -> FallbackLinks {
    FallbackLinks {
        spotify: format!("https://open.spotify.com/show/{}", config.spotify_show_id),
        apple: format!(
            "https://podcasts.apple.com/fr/podcast/id{}",
            config.apple_podcast_id
        ),
        deezer: format!("https://www.deezer.com/fr/show/{}", config.deezer_show_id),
        podcast_addict: format!(
            "https://podcastaddict.com/podcast/{}",
            config.podcast_addict_id
        ),
        antennapod: config.feed_url.clone(),
        pocket_casts: format!("https://pca.st/podcast/{}", config.pocketcasts_uuid),
        overcast: format!("https://overcast.fm/itunes{}", config.apple_podcast_id),
        castopod: config.feed_url.clone(),
    }
}
