//! Mock platform API endpoints.
//!
//! Each helper registers a mockito endpoint shaped like the real platform's
//! response, built from a compact list of (release date, link) pairs so
//! tests read as data.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

pub static TEST_SPOTIFY_SHOW_ID: &str = "3vXiPa0rPeGZxsqrnY8AQS";
pub static TEST_APPLE_PODCAST_ID: &str = "1512345678";
pub static TEST_DEEZER_SHOW_ID: &str = "473812";
pub static TEST_SPOTIFY_ACCESS_TOKEN: &str = "test-spotify-access-token";

/// Mock the Spotify client-credentials token endpoint at `/api/token`.
pub fn mock_spotify_token_endpoint(server: &mut ServerGuard, expected_requests: usize) -> Mock {
    server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": TEST_SPOTIFY_ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600,
            })
            .to_string(),
        )
        .expect(expected_requests)
        .create()
}

/// Mock the Spotify show-episodes endpoint with one entry per
/// `(release_date, episode_url)` pair.
pub fn mock_spotify_episodes_endpoint(
    server: &mut ServerGuard,
    show_id: &str,
    episodes: &[(&str, &str)],
) -> Mock {
    let items: Vec<_> = episodes
        .iter()
        .map(|(release_date, url)| {
            json!({
                "release_date": release_date,
                "external_urls": { "spotify": url },
            })
        })
        .collect();

    server
        .mock("GET", format!("/v1/shows/{}/episodes", show_id).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "items": items }).to_string())
        .create()
}

/// Mock the iTunes lookup endpoint.
///
/// The response always leads with the podcast's own `track` entry, the way
/// the real lookup API does, so resolvers are forced to filter by
/// `wrapperType`.
pub fn mock_apple_lookup_endpoint(server: &mut ServerGuard, episodes: &[(&str, &str)]) -> Mock {
    let mut results = vec![json!({
        "wrapperType": "track",
        "kind": "podcast",
        "collectionName": "Test Show",
    })];
    results.extend(episodes.iter().map(|(release_date, url)| {
        json!({
            "wrapperType": "podcastEpisode",
            "releaseDate": format!("{}T07:00:00Z", release_date),
            "trackViewUrl": url,
        })
    }));

    server
        .mock("GET", "/lookup")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "resultCount": results.len(),
                "results": results,
            })
            .to_string(),
        )
        .create()
}

/// Mock the Deezer podcast-episodes endpoint with one entry per
/// `(release_date, episode_id)` pair.
pub fn mock_deezer_episodes_endpoint(
    server: &mut ServerGuard,
    show_id: &str,
    episodes: &[(&str, u64)],
) -> Mock {
    let data: Vec<_> = episodes
        .iter()
        .map(|(release_date, id)| {
            json!({
                "id": id,
                "release_date": format!("{} 07:00:00", release_date),
            })
        })
        .collect();

    server
        .mock("GET", format!("/podcast/{}/episodes", show_id).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": data }).to_string())
        .create()
}
