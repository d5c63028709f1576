use thiserror::Error;

/// Feed reader error type.
///
/// The feed is the only upstream whose failure is user-visible: the page-view
/// path propagates it so the caller can fall back to a generic page instead
/// of an episode-specific one.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed could not be fetched (network failure, timeout, non-2xx).
    #[error("feed fetch failed: {0}")]
    Unavailable(String),
    /// The feed entry for the requested episode is missing required fields.
    #[error("episode feed entry is malformed: {0}")]
    Malformed(String),
}
