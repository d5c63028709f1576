use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::Error,
    service::platform::PlatformConfig,
    store::{BlobStore, HttpBlobStore},
    worker::{handler::WorkerJobHandler, Worker},
};

/// Every external call the pipeline makes shares this bound.
const HTTP_TIMEOUT: Duration = Duration::from_secs(8);

const USER_AGENT: &str = concat!(
    "castlink/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/saletesincere/castlink)"
);

/// Connect to the database and run migrations.
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Redis for the job queue.
pub async fn connect_to_redis(config: &Config) -> Result<fred::prelude::Pool, Error> {
    use fred::prelude::*;

    let redis_config = fred::prelude::Config::from_url(&config.redis_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(pool)
}

/// Build the shared HTTP client with the pipeline-wide timeout.
pub fn build_http_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    Ok(client)
}

/// Build the object store client for preview image blobs.
pub fn build_blob_store(config: &Config, http: &reqwest::Client) -> Arc<dyn BlobStore> {
    Arc::new(HttpBlobStore::new(
        http.clone(),
        &config.s3_endpoint,
        &config.s3_bucket,
        config.s3_access_token.clone(),
        config.s3_public_url.clone(),
    ))
}

/// Assemble and start the worker queue + pool.
pub async fn start_workers(
    config: &Config,
    db: DatabaseConnection,
    redis_pool: fred::prelude::Pool,
    http: reqwest::Client,
    blob_store: Arc<dyn BlobStore>,
) -> Result<Worker, Error> {
    let platforms = PlatformConfig::from_config(config);
    let handler = WorkerJobHandler::new(db, http, &platforms, blob_store);

    let worker = Worker::new(config.worker_concurrency, redis_pool, handler);
    worker.pool.start().await?;

    Ok(worker)
}
