//! SQLite-backed local song service

use async_trait::async_trait;
use jukebox_common::db::songs;
use jukebox_common::{time, EntryStatus, Error, Result, Song};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use super::{AlbumLocalService, ServiceContext, SongLocalService};

pub struct SongLocalServiceImpl {
    pool: SqlitePool,
    albums: Arc<dyn AlbumLocalService>,
}

impl SongLocalServiceImpl {
    pub fn new(pool: SqlitePool, albums: Arc<dyn AlbumLocalService>) -> Self {
        Self { pool, albums }
    }
}

#[async_trait]
impl SongLocalService for SongLocalServiceImpl {
    /// Songs inherit artist, group and company from their album
    async fn add_song(&self, album_id: i64, name: String, context: ServiceContext) -> Result<Song> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Song name must not be blank".to_string()));
        }

        let album = self.albums.get_album(album_id).await?;
        if album.is_in_trash() {
            return Err(Error::InvalidInput(format!(
                "Cannot add a song to album {} while it is in the trash",
                album_id
            )));
        }

        let mut song = Song::new(0);
        song.group_id = album.group_id;
        song.company_id = album.company_id;
        song.user_id = context.user_id;
        song.artist_id = album.artist_id;
        song.album_id = album.album_id;
        song.name = name;

        let stored = songs::insert(&self.pool, &song).await?;
        info!(
            "Added song {} ({}) to album {}",
            stored.song_id, stored.name, album_id
        );
        Ok(stored)
    }

    async fn fetch_song(&self, song_id: i64) -> Result<Option<Song>> {
        songs::find_by_id(&self.pool, song_id).await
    }

    async fn get_song(&self, song_id: i64) -> Result<Song> {
        self.fetch_song(song_id)
            .await?
            .ok_or_else(|| Error::no_such_entity("Song", song_id))
    }

    async fn get_songs_by_album_id(&self, album_id: i64) -> Result<Vec<Song>> {
        songs::list_by_album(&self.pool, album_id, EntryStatus::Approved).await
    }

    async fn delete_song(&self, song_id: i64) -> Result<Song> {
        let song = self.get_song(song_id).await?;
        songs::delete(&self.pool, song_id).await?;
        info!("Deleted song {} ({})", song_id, song.name);
        Ok(song)
    }

    async fn move_song_to_trash(&self, user_id: i64, song_id: i64) -> Result<Song> {
        let mut song = self.get_song(song_id).await?;
        if song.is_in_trash() {
            return Err(Error::InvalidInput(format!(
                "Song {} is already in the trash",
                song_id
            )));
        }

        song.status = EntryStatus::InTrash;
        song.modified_date = time::now();
        songs::update(&self.pool, &song).await?;
        info!("User {} moved song {} to the trash", user_id, song_id);
        Ok(song)
    }

    async fn get_company_songs(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Song>> {
        songs::list_by_company(&self.pool, company_id, start, end).await
    }
}
