use sea_orm_migration::{prelude::*, schema::*};

static IDX_EPISODE_LINKS_SEASON_EPISODE: &str = "idx_episode_links_season_episode";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EpisodeLinks::Table)
                    .if_not_exists()
                    .col(pk_auto(EpisodeLinks::Id))
                    .col(integer(EpisodeLinks::Season))
                    .col(integer(EpisodeLinks::Episode))
                    .col(string_null(EpisodeLinks::SpotifyUrl))
                    .col(string_null(EpisodeLinks::AppleUrl))
                    .col(string_null(EpisodeLinks::DeezerUrl))
                    .col(string_null(EpisodeLinks::OgImageUrl))
                    .col(string_null(EpisodeLinks::OgStorageKey))
                    .col(timestamp_null(EpisodeLinks::FeedLastBuild))
                    .col(timestamp_null(EpisodeLinks::GeneratedAt))
                    .col(timestamp(EpisodeLinks::ResolvedAt))
                    .col(timestamp(EpisodeLinks::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Upsert target: one row per (season, episode).
        manager
            .create_index(
                Index::create()
                    .name(IDX_EPISODE_LINKS_SEASON_EPISODE)
                    .table(EpisodeLinks::Table)
                    .col(EpisodeLinks::Season)
                    .col(EpisodeLinks::Episode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EPISODE_LINKS_SEASON_EPISODE)
                    .table(EpisodeLinks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EpisodeLinks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EpisodeLinks {
    Table,
    Id,
    Season,
    Episode,
    SpotifyUrl,
    AppleUrl,
    DeezerUrl,
    OgImageUrl,
    OgStorageKey,
    FeedLastBuild,
    GeneratedAt,
    ResolvedAt,
    CreatedAt,
}
