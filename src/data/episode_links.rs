use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use entity::episode_links::Column;

/// Incoming worker results for one episode, merged into the cached row.
///
/// Every optional field follows the same rule on conflict: a present value
/// overwrites, an absent one keeps whatever the row already has. A platform
/// outage therefore never erases a previously resolved link.
#[derive(Debug, Clone, Default)]
pub struct EpisodeLinksUpdate {
    pub spotify_url: Option<String>,
    pub apple_url: Option<String>,
    pub deezer_url: Option<String>,
    pub og_image_url: Option<String>,
    pub og_storage_key: Option<String>,
    pub feed_last_build: Option<NaiveDateTime>,
    pub generated_at: Option<NaiveDateTime>,
}

pub struct EpisodeLinksRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EpisodeLinksRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get the cached links row for an episode, if one exists yet.
    pub async fn get_by_key(
        &self,
        season: i32,
        episode: i32,
    ) -> Result<Option<entity::episode_links::Model>, DbErr> {
        entity::prelude::EpisodeLinks::find()
            .filter(Column::Season.eq(season))
            .filter(Column::Episode.eq(episode))
            .one(self.db)
            .await
    }

    /// Merge worker results into the episode's row, creating it on first use.
    ///
    /// This is a single statement with conflict resolution so two workers
    /// resolving the same episode concurrently cannot lose each other's
    /// updates. On conflict every payload column takes
    /// `COALESCE(excluded.col, episode_links.col)` while `resolved_at`
    /// always takes the incoming value.
    pub async fn upsert(
        &self,
        season: i32,
        episode: i32,
        update: EpisodeLinksUpdate,
    ) -> Result<entity::episode_links::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let row = entity::episode_links::ActiveModel {
            season: ActiveValue::Set(season),
            episode: ActiveValue::Set(episode),
            spotify_url: ActiveValue::Set(update.spotify_url),
            apple_url: ActiveValue::Set(update.apple_url),
            deezer_url: ActiveValue::Set(update.deezer_url),
            og_image_url: ActiveValue::Set(update.og_image_url),
            og_storage_key: ActiveValue::Set(update.og_storage_key),
            feed_last_build: ActiveValue::Set(update.feed_last_build),
            generated_at: ActiveValue::Set(update.generated_at),
            resolved_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::EpisodeLinks::insert(row)
            .on_conflict(
                OnConflict::columns([Column::Season, Column::Episode])
                    .value(
                        Column::SpotifyUrl,
                        Expr::cust("COALESCE(excluded.spotify_url, episode_links.spotify_url)"),
                    )
                    .value(
                        Column::AppleUrl,
                        Expr::cust("COALESCE(excluded.apple_url, episode_links.apple_url)"),
                    )
                    .value(
                        Column::DeezerUrl,
                        Expr::cust("COALESCE(excluded.deezer_url, episode_links.deezer_url)"),
                    )
                    .value(
                        Column::OgImageUrl,
                        Expr::cust("COALESCE(excluded.og_image_url, episode_links.og_image_url)"),
                    )
                    .value(
                        Column::OgStorageKey,
                        Expr::cust(
                            "COALESCE(excluded.og_storage_key, episode_links.og_storage_key)",
                        ),
                    )
                    .value(
                        Column::FeedLastBuild,
                        Expr::cust(
                            "COALESCE(excluded.feed_last_build, episode_links.feed_last_build)",
                        ),
                    )
                    .value(
                        Column::GeneratedAt,
                        Expr::cust("COALESCE(excluded.generated_at, episode_links.generated_at)"),
                    )
                    .value(Column::ResolvedAt, Expr::cust("excluded.resolved_at"))
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
