pub mod job_processing;
pub mod lifecycle;

use std::sync::Arc;

use castlink::{
    service::platform::PlatformConfig,
    store::HttpBlobStore,
    worker::handler::WorkerJobHandler,
};
use castlink_test_utils::db;
use sea_orm::DatabaseConnection;

/// Platform config pointing every base URL at the given server.
pub fn test_platform_config(server_url: &str) -> PlatformConfig {
    PlatformConfig {
        spotify_token_url: format!("{}/api/token", server_url),
        spotify_api_url: server_url.to_string(),
        spotify_client_id: "spotify_client_id".to_string(),
        spotify_client_secret: "spotify_client_secret".to_string(),
        spotify_show_id: castlink_test_utils::fixtures::platform::TEST_SPOTIFY_SHOW_ID.to_string(),
        apple_api_url: server_url.to_string(),
        apple_podcast_id: castlink_test_utils::fixtures::platform::TEST_APPLE_PODCAST_ID
            .to_string(),
        deezer_api_url: server_url.to_string(),
        deezer_show_id: castlink_test_utils::fixtures::platform::TEST_DEEZER_SHOW_ID.to_string(),
        podcast_addict_id: "5436962".to_string(),
        pocketcasts_uuid: "a2b3c4d5-0000-1111-2222-333344445555".to_string(),
        feed_url: "https://podcasts.example.com/@show/feed.xml".to_string(),
    }
}

/// Handler wired to an in-memory database and the given mock server.
pub async fn setup_handler(server_url: &str) -> (WorkerJobHandler, DatabaseConnection) {
    let db = db::connect_with_schema().await.expect("sqlite setup");
    let http = reqwest::Client::new();
    let blob_store = Arc::new(HttpBlobStore::new(
        http.clone(),
        server_url,
        "test-media",
        None,
        None,
    ));

    let handler = WorkerJobHandler::new(
        db.clone(),
        http,
        &test_platform_config(server_url),
        blob_store,
    );

    (handler, db)
}
