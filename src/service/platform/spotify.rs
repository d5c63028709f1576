//! Spotify episode resolution via the show-episodes catalog endpoint.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{error::platform::PlatformError, service::platform::PlatformConfig};

/// How many of the newest episodes one search page covers.
const EPISODE_SEARCH_LIMIT: u32 = 50;

/// Tokens are refreshed this long before Spotify's stated expiry so an
/// in-flight search never races the cutoff.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Process-scoped client-credentials token state.
///
/// Starts uninitialized and fetches on first use, then reuses the token until
/// its expiry margin. Held behind the resolver's mutex so concurrent jobs
/// share one token instead of racing the auth endpoint.
#[derive(Debug, Default)]
pub struct SpotifyTokenCache(Option<CachedToken>);

impl SpotifyTokenCache {
    pub fn new() -> Self {
        Self(None)
    }

    async fn access_token(
        &mut self,
        http: &reqwest::Client,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, PlatformError> {
        if let Some(ref cached) = self.0 {
            if cached.expires_at > Utc::now() {
                return Ok(cached.access_token.clone());
            }
        }

        let response = http
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlatformError::SpotifyAuth(response.status().as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at =
            Utc::now() + Duration::seconds((token.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0));

        self.0 = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }
}

pub struct SpotifyResolver {
    http: reqwest::Client,
    token_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    show_id: String,
    token_cache: Mutex<SpotifyTokenCache>,
}

impl SpotifyResolver {
    pub fn new(http: reqwest::Client, config: &PlatformConfig) -> Self {
        Self {
            http,
            token_url: config.spotify_token_url.clone(),
            api_url: config.spotify_api_url.clone(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            show_id: config.spotify_show_id.clone(),
            token_cache: Mutex::new(SpotifyTokenCache::new()),
        }
    }

    /// Resolve the episode released on the given day to its Spotify URL.
    ///
    /// Searches the newest [`EPISODE_SEARCH_LIMIT`] episodes of the show and
    /// matches `release_date` exactly. Returns `Ok(None)` when no episode
    /// matches or the catalog endpoint answers non-2xx; auth and transport
    /// failures are errors.
    pub async fn resolve(&self, release_date: NaiveDate) -> Result<Option<String>, PlatformError> {
        let token = {
            let mut cache = self.token_cache.lock().await;
            cache
                .access_token(
                    &self.http,
                    &self.token_url,
                    &self.client_id,
                    &self.client_secret,
                )
                .await?
        };

        let url = format!(
            "{}/v1/shows/{}/episodes?limit={}",
            self.api_url, self.show_id, EPISODE_SEARCH_LIMIT
        );
        let response = self.http.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let page: EpisodePage = response.json().await?;
        let wanted = super::format_release_date(release_date);

        Ok(page
            .items
            .into_iter()
            .find(|episode| episode.release_date == wanted)
            .map(|episode| episode.external_urls.spotify))
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct EpisodePage {
    items: Vec<EpisodeItem>,
}

#[derive(Deserialize)]
struct EpisodeItem {
    release_date: String,
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: String,
}
