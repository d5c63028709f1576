use thiserror::Error;

/// Platform resolver error type.
///
/// Only transport-level trouble surfaces as an error; "no episode matched the
/// release date" and non-2xx catalog responses collapse to `None` inside the
/// resolvers, matching the platforms' search contract. The worker's fan-out
/// additionally maps these errors to `None` so one platform cannot fail a job.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Spotify client-credentials authentication failed.
    #[error("Spotify auth failed with status {0}")]
    SpotifyAuth(u16),
    /// The HTTP request to the platform API failed outright.
    #[error("platform request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// A Podcast Addict link was requested without an audio URL.
    #[error("audio URL is required to build a Podcast Addict link")]
    MissingAudioUrl,
}
