//! SQLite-backed local album service

use async_trait::async_trait;
use jukebox_common::db::{albums, songs};
use jukebox_common::{time, Album, EntryStatus, Error, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

use super::{validate_album_fields, AlbumFields, AlbumLocalService, ArtistLocalService, ServiceContext};

const SERVICE_IDENTIFIER: &str = "jukebox.service.AlbumLocalService";

pub struct AlbumLocalServiceImpl {
    pool: SqlitePool,
    artists: Arc<dyn ArtistLocalService>,
}

impl AlbumLocalServiceImpl {
    pub fn new(pool: SqlitePool, artists: Arc<dyn ArtistLocalService>) -> Self {
        Self { pool, artists }
    }

    async fn set_status(&self, user_id: i64, album_id: i64, status: EntryStatus) -> Result<Album> {
        let mut album = self.get_album(album_id).await?;

        if album.status == status {
            return Err(Error::InvalidInput(format!(
                "Album {} already has status {:?}",
                album_id, status
            )));
        }

        album.status = status;
        album.status_by_user_id = user_id;
        album.modified_date = time::now();
        albums::update(&self.pool, &album).await?;

        let changed = match status {
            EntryStatus::InTrash => songs::trash_by_album(&self.pool, album_id).await?,
            EntryStatus::Approved => songs::restore_by_album(&self.pool, album_id).await?,
        };
        info!(
            "Album {} set to {:?} by user {} ({} songs updated)",
            album_id, status, user_id, changed
        );

        Ok(album)
    }
}

#[async_trait]
impl AlbumLocalService for AlbumLocalServiceImpl {
    async fn add_album(&self, album: Album) -> Result<Album> {
        let stored = albums::insert(&self.pool, &album).await?;
        debug!("Added album {} ({})", stored.album_id, stored.name);
        Ok(stored)
    }

    fn create_album(&self, album_id: i64) -> Album {
        Album::new(album_id)
    }

    async fn delete_album(&self, album_id: i64) -> Result<Album> {
        let album = self.get_album(album_id).await?;
        albums::delete(&self.pool, album_id).await?;
        info!("Deleted album {} ({})", album_id, album.name);
        Ok(album)
    }

    async fn delete_album_entry(&self, album: Album) -> Result<Album> {
        if !albums::delete(&self.pool, album.album_id).await? {
            return Err(Error::no_such_entity("Album", album.album_id));
        }
        info!("Deleted album {} ({})", album.album_id, album.name);
        Ok(album)
    }

    async fn fetch_album(&self, album_id: i64) -> Result<Option<Album>> {
        albums::find_by_id(&self.pool, album_id).await
    }

    async fn fetch_album_by_uuid_and_group_id(&self, uuid: &str, group_id: i64) -> Result<Option<Album>> {
        albums::find_by_uuid_and_group(&self.pool, uuid, group_id).await
    }

    async fn get_album(&self, album_id: i64) -> Result<Album> {
        self.fetch_album(album_id)
            .await?
            .ok_or_else(|| Error::no_such_entity("Album", album_id))
    }

    async fn get_albums_by_uuid_and_company_id(&self, uuid: &str, company_id: i64) -> Result<Vec<Album>> {
        albums::list_by_uuid_and_company(&self.pool, uuid, company_id).await
    }

    async fn get_album_by_uuid_and_group_id(&self, uuid: &str, group_id: i64) -> Result<Album> {
        self.fetch_album_by_uuid_and_group_id(uuid, group_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "No Album exists with uuid {} in group {}",
                    uuid, group_id
                ))
            })
    }

    async fn get_albums_range(&self, start: i32, end: i32) -> Result<Vec<Album>> {
        albums::list_range(&self.pool, i64::from(start), i64::from(end)).await
    }

    async fn get_albums_total(&self) -> Result<i64> {
        albums::count(&self.pool).await
    }

    async fn update_album(&self, album: Album) -> Result<Album> {
        if !albums::update(&self.pool, &album).await? {
            return Err(Error::no_such_entity("Album", album.album_id));
        }
        debug!("Updated album {}", album.album_id);
        Ok(album)
    }

    fn osgi_service_identifier(&self) -> String {
        SERVICE_IDENTIFIER.to_string()
    }

    async fn add_album_with_fields(
        &self,
        user_id: i64,
        fields: AlbumFields,
        context: ServiceContext,
    ) -> Result<Album> {
        validate_album_fields(&fields)?;
        let artist = self.artists.get_artist(fields.artist_id).await?;

        let mut album = Album::new(0);
        album.group_id = context.group_id;
        album.company_id = context.company_id;
        album.user_id = user_id;
        album.status_by_user_id = user_id;
        album.artist_id = artist.artist_id;
        album.name = fields.name;
        album.year = fields.year;
        album.cover_image = fields.cover_image;

        let stored = albums::insert(&self.pool, &album).await?;
        info!(
            "User {} added album {} ({}) by {}",
            user_id, stored.album_id, stored.name, artist.name
        );
        Ok(stored)
    }

    async fn delete_albums(&self, group_id: i64) -> Result<()> {
        let ids = albums::ids_by_group(&self.pool, group_id).await?;
        for album_id in &ids {
            albums::delete(&self.pool, *album_id).await?;
        }
        info!("Deleted {} albums in group {}", ids.len(), group_id);
        Ok(())
    }

    async fn get_albums(&self, group_id: i64) -> Result<Vec<Album>> {
        albums::list_by_group(&self.pool, group_id, EntryStatus::Approved, -1, -1).await
    }

    async fn get_albums_page(&self, group_id: i64, start: i32, end: i32) -> Result<Vec<Album>> {
        albums::list_by_group(
            &self.pool,
            group_id,
            EntryStatus::Approved,
            i64::from(start),
            i64::from(end),
        )
        .await
    }

    async fn get_albums_by_artist_id(&self, artist_id: i64) -> Result<Vec<Album>> {
        albums::list_by_artist(&self.pool, None, artist_id, EntryStatus::Approved).await
    }

    async fn get_group_albums_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<Vec<Album>> {
        albums::list_by_artist(&self.pool, Some(group_id), artist_id, EntryStatus::Approved).await
    }

    async fn get_group_albums_count_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<i64> {
        albums::count_by_artist(&self.pool, group_id, artist_id, EntryStatus::Approved).await
    }

    async fn get_albums_count(&self, group_id: i64) -> Result<i64> {
        albums::count_by_group(&self.pool, group_id, EntryStatus::Approved).await
    }

    async fn get_albums_by_keywords(&self, group_id: i64, keywords: &str) -> Result<Vec<Album>> {
        albums::list_by_group_and_name(&self.pool, group_id, keywords, EntryStatus::Approved).await
    }

    async fn get_albums_count_by_keywords(&self, group_id: i64, keywords: &str) -> Result<i64> {
        albums::count_by_group_and_name(&self.pool, group_id, keywords, EntryStatus::Approved).await
    }

    async fn move_album_to_trash(&self, user_id: i64, album_id: i64) -> Result<Album> {
        self.set_status(user_id, album_id, EntryStatus::InTrash).await
    }

    async fn restore_album_from_trash(&self, user_id: i64, album_id: i64) -> Result<Album> {
        self.set_status(user_id, album_id, EntryStatus::Approved).await
    }

    async fn update_album_with_fields(
        &self,
        user_id: i64,
        album_id: i64,
        fields: AlbumFields,
        context: ServiceContext,
    ) -> Result<Album> {
        validate_album_fields(&fields)?;
        let mut album = self.get_album(album_id).await?;
        let artist = self.artists.get_artist(fields.artist_id).await?;

        album.artist_id = artist.artist_id;
        album.name = fields.name;
        album.year = fields.year;
        album.modified_date = time::now();
        // No new upload keeps the current cover
        if fields.cover_image.is_some() {
            album.cover_image = fields.cover_image;
        }

        albums::update(&self.pool, &album).await?;
        info!(
            "User {} updated album {} in group {}",
            user_id, album_id, context.group_id
        );
        Ok(album)
    }

    async fn get_company_albums(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Album>> {
        albums::list_by_company(&self.pool, company_id, start, end).await
    }
}
