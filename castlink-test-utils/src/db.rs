//! In-memory sqlite databases mirroring the production schema.

use sea_orm::{
    sea_query::Index, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    DbErr, Schema,
};

/// Connect to a fresh in-memory sqlite database with no tables.
///
/// Capped at one pooled connection: every sqlite `:memory:` connection is its
/// own database, so a second pool connection would see empty tables.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    Database::connect(opt).await
}

/// Connect to a fresh in-memory sqlite database with the `episode_links`
/// table and its unique (season, episode) index, the upsert conflict target.
pub async fn connect_with_schema() -> Result<DatabaseConnection, DbErr> {
    let db = connect().await?;
    let schema = Schema::new(DbBackend::Sqlite);

    let table = schema.create_table_from_entity(entity::prelude::EpisodeLinks);
    db.execute(&table).await?;

    let index = Index::create()
        .name("idx_episode_links_season_episode")
        .table(entity::episode_links::Entity)
        .col(entity::episode_links::Column::Season)
        .col(entity::episode_links::Column::Episode)
        .unique()
        .to_owned();
    db.execute(&index).await?;

    Ok(db)
}
