//! SQLite-backed local artist service

use async_trait::async_trait;
use jukebox_common::db::artists;
use jukebox_common::{time, Artist, Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use super::{ArtistLocalService, ServiceContext};

pub struct ArtistLocalServiceImpl {
    pool: SqlitePool,
}

impl ArtistLocalServiceImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn validate_artist_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("Artist name must not be blank".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ArtistLocalService for ArtistLocalServiceImpl {
    async fn add_artist(&self, name: String, bio: String, context: ServiceContext) -> Result<Artist> {
        validate_artist_name(&name)?;

        let mut artist = Artist::new(0);
        artist.group_id = context.group_id;
        artist.company_id = context.company_id;
        artist.user_id = context.user_id;
        artist.name = name;
        artist.bio = bio;

        let stored = artists::insert(&self.pool, &artist).await?;
        info!("Added artist {} ({})", stored.artist_id, stored.name);
        Ok(stored)
    }

    async fn fetch_artist(&self, artist_id: i64) -> Result<Option<Artist>> {
        artists::find_by_id(&self.pool, artist_id).await
    }

    async fn get_artist(&self, artist_id: i64) -> Result<Artist> {
        self.fetch_artist(artist_id)
            .await?
            .ok_or_else(|| Error::no_such_entity("Artist", artist_id))
    }

    async fn get_artists(&self, group_id: i64) -> Result<Vec<Artist>> {
        artists::list_by_group(&self.pool, group_id).await
    }

    async fn get_artists_count(&self, group_id: i64) -> Result<i64> {
        artists::count_by_group(&self.pool, group_id).await
    }

    async fn update_artist(&self, artist_id: i64, name: String, bio: String) -> Result<Artist> {
        validate_artist_name(&name)?;

        let mut artist = self.get_artist(artist_id).await?;
        artist.name = name;
        artist.bio = bio;
        artist.modified_date = time::now();

        artists::update(&self.pool, &artist).await?;
        Ok(artist)
    }

    async fn delete_artist(&self, artist_id: i64) -> Result<Artist> {
        let artist = self.get_artist(artist_id).await?;
        // Fails with a foreign key error while albums still reference the artist
        artists::delete(&self.pool, artist_id).await?;
        info!("Deleted artist {} ({})", artist_id, artist.name);
        Ok(artist)
    }
}
