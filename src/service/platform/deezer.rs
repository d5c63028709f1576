//! Deezer episode resolution via the public podcast-episodes endpoint.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::platform::PlatformError, service::platform::PlatformConfig};

const EPISODE_SEARCH_LIMIT: u32 = 50;

pub struct DeezerResolver {
    http: reqwest::Client,
    api_url: String,
    show_id: String,
}

impl DeezerResolver {
    pub fn new(http: reqwest::Client, config: &PlatformConfig) -> Self {
        Self {
            http,
            api_url: config.deezer_api_url.clone(),
            show_id: config.deezer_show_id.clone(),
        }
    }

    /// Resolve the episode released on the given day to its Deezer URL.
    ///
    /// Deezer's episode list carries no canonical web URL, so the link is
    /// built from the matched episode's id.
    pub async fn resolve(&self, release_date: NaiveDate) -> Result<Option<String>, PlatformError> {
        let url = format!(
            "{}/podcast/{}/episodes?limit={}",
            self.api_url, self.show_id, EPISODE_SEARCH_LIMIT
        );
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let page: EpisodePage = response.json().await?;
        let wanted = super::format_release_date(release_date);

        Ok(page
            .data
            .into_iter()
            .find(|episode| super::date_part(&episode.release_date) == wanted)
            .map(|episode| format!("https://www.deezer.com/fr/episode/{}", episode.id)))
    }
}

#[derive(Deserialize)]
struct EpisodePage {
    data: Vec<EpisodeItem>,
}

#[derive(Deserialize)]
struct EpisodeItem {
    id: u64,
    release_date: String,
}
