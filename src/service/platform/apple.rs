//! Apple Podcasts episode resolution via the iTunes lookup API.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::platform::PlatformError, service::platform::PlatformConfig};

/// The lookup API returns the podcast itself plus its newest episodes up to
/// this many entries.
const EPISODE_LOOKUP_LIMIT: u32 = 200;

pub struct AppleResolver {
    http: reqwest::Client,
    api_url: String,
    podcast_id: String,
}

impl AppleResolver {
    pub fn new(http: reqwest::Client, config: &PlatformConfig) -> Self {
        Self {
            http,
            api_url: config.apple_api_url.clone(),
            podcast_id: config.apple_podcast_id.clone(),
        }
    }

    /// Resolve the episode released on the given day to its Apple Podcasts
    /// URL, or `None` when nothing matches or the lookup answers non-2xx.
    ///
    /// The result list mixes the podcast entry with episode entries, so
    /// entries are filtered by `wrapperType` before date matching.
    pub async fn resolve(&self, release_date: NaiveDate) -> Result<Option<String>, PlatformError> {
        let url = format!(
            "{}/lookup?id={}&entity=podcastEpisode&limit={}",
            self.api_url, self.podcast_id, EPISODE_LOOKUP_LIMIT
        );
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let lookup: LookupResponse = response.json().await?;
        let wanted = super::format_release_date(release_date);

        Ok(lookup
            .results
            .into_iter()
            .filter(|item| item.wrapper_type.as_deref() == Some("podcastEpisode"))
            .find(|item| {
                item.release_date
                    .as_deref()
                    .map(super::date_part)
                    == Some(wanted.as_str())
            })
            .and_then(|item| item.track_view_url))
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    results: Vec<LookupItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupItem {
    wrapper_type: Option<String>,
    release_date: Option<String>,
    track_view_url: Option<String>,
}
