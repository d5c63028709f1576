use castlink::{config::Config, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config)
        .await
        .expect("Failed to connect to database");
    let redis_pool = startup::connect_to_redis(&config)
        .await
        .expect("Failed to connect to Redis");
    let http = startup::build_http_client().expect("Failed to build HTTP client");
    let blob_store = startup::build_blob_store(&config, &http);

    let worker = startup::start_workers(&config, db, redis_pool, http, blob_store)
        .await
        .expect("Failed to start worker pool");

    tracing::info!("Resolution workers running, waiting for shutdown signal");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    if let Err(e) = worker.pool.stop().await {
        tracing::error!("Worker pool shutdown failed: {:?}", e);
    }
}
