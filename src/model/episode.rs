//! Episode identity and the keys derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Natural identifier of a podcast episode: its (season, episode) pair.
///
/// Stable for the lifetime of the show and never reused for different
/// content, which is what makes the derived queue dedup key and object
/// storage key safe to compute deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub season: i32,
    pub episode: i32,
}

impl EpisodeKey {
    pub fn new(season: i32, episode: i32) -> Self {
        Self { season, episode }
    }

    /// Both components must be positive; zero or negative numbers mean the
    /// caller built the key from unvalidated input.
    pub fn is_valid(&self) -> bool {
        self.season > 0 && self.episode > 0
    }

    /// Queue dedup key, shared by every submission for the same episode.
    pub fn dedup_key(&self) -> String {
        format!("episode-{}-{}", self.season, self.episode)
    }

    /// Deterministic object-store key for the episode's preview image.
    ///
    /// Deterministic so a regenerated image replaces its predecessor under
    /// the same key instead of accumulating blobs.
    pub fn storage_key(&self) -> String {
        format!("og-images/s{}e{}.png", self.season, self.episode)
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}e{}", self.season, self.episode)
    }
}
