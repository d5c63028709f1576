use sea_orm::entity::prelude::*;

/// Cached cross-platform links and Open Graph preview metadata for one
/// podcast episode, keyed by its (season, episode) pair.
///
/// Platform URL columns are independently nullable; absence means "not yet
/// resolved or not found on that platform". `feed_last_build` is the source
/// feed's last-build timestamp captured when the preview image was generated,
/// used only as a staleness fingerprint. `generated_at` advances only when a
/// new preview image URL was actually produced, while `resolved_at` advances
/// on every worker run.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "episode_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub season: i32,
    pub episode: i32,
    pub spotify_url: Option<String>,
    pub apple_url: Option<String>,
    pub deezer_url: Option<String>,
    pub og_image_url: Option<String>,
    pub og_storage_key: Option<String>,
    pub feed_last_build: Option<DateTime>,
    pub generated_at: Option<DateTime>,
    pub resolved_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
