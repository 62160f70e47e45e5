//! Catalog services backing the dispatch tables
//!
//! Local services own the catalog rules and talk to SQLite. The remote
//! album service is a facade over the local one that only exposes
//! approved content and derives the acting user from its caller.

use async_trait::async_trait;
use jukebox_common::{Album, Artist, Result, Song};
use serde::{Deserialize, Serialize};

mod album_local;
mod album_remote;
mod artist_local;
mod song_local;

pub use album_local::AlbumLocalServiceImpl;
pub use album_remote::AlbumServiceImpl;
pub use artist_local::ArtistLocalServiceImpl;
pub use song_local::SongLocalServiceImpl;

/// Scope of a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceContext {
    pub company_id: i64,
    pub group_id: i64,
    pub user_id: i64,
}

impl ServiceContext {
    pub fn new(company_id: i64, group_id: i64, user_id: i64) -> Self {
        Self {
            company_id,
            group_id,
            user_id,
        }
    }
}

/// Field values for creating or editing an album
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumFields {
    pub artist_id: i64,
    pub name: String,
    pub year: i32,
    pub cover_image: Option<Vec<u8>>,
}

/// Local album operations
///
/// The first group mirrors persistence-level access by primary key or
/// uuid; the second group applies catalog rules (validation, trash).
#[async_trait]
pub trait AlbumLocalService: Send + Sync {
    /// Persist a fully-populated album as given
    async fn add_album(&self, album: Album) -> Result<Album>;

    /// Unsaved album carrying `album_id` and fresh audit fields
    fn create_album(&self, album_id: i64) -> Album;

    async fn delete_album(&self, album_id: i64) -> Result<Album>;

    async fn delete_album_entry(&self, album: Album) -> Result<Album>;

    async fn fetch_album(&self, album_id: i64) -> Result<Option<Album>>;

    async fn fetch_album_by_uuid_and_group_id(&self, uuid: &str, group_id: i64) -> Result<Option<Album>>;

    async fn get_album(&self, album_id: i64) -> Result<Album>;

    async fn get_albums_by_uuid_and_company_id(&self, uuid: &str, company_id: i64) -> Result<Vec<Album>>;

    async fn get_album_by_uuid_and_group_id(&self, uuid: &str, group_id: i64) -> Result<Album>;

    /// Every album, any group or status, in `[start, end)`
    async fn get_albums_range(&self, start: i32, end: i32) -> Result<Vec<Album>>;

    async fn get_albums_total(&self) -> Result<i64>;

    /// Persist every column of an existing album as given
    async fn update_album(&self, album: Album) -> Result<Album>;

    fn osgi_service_identifier(&self) -> String;

    /// Validate and create a new album owned by `user_id`
    async fn add_album_with_fields(
        &self,
        user_id: i64,
        fields: AlbumFields,
        context: ServiceContext,
    ) -> Result<Album>;

    async fn delete_albums(&self, group_id: i64) -> Result<()>;

    async fn get_albums(&self, group_id: i64) -> Result<Vec<Album>>;

    async fn get_albums_page(&self, group_id: i64, start: i32, end: i32) -> Result<Vec<Album>>;

    async fn get_albums_by_artist_id(&self, artist_id: i64) -> Result<Vec<Album>>;

    /// Approved albums of an artist within one group
    async fn get_group_albums_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<Vec<Album>>;

    async fn get_group_albums_count_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<i64>;

    async fn get_albums_count(&self, group_id: i64) -> Result<i64>;

    /// Approved albums of a group whose name contains `keywords`
    async fn get_albums_by_keywords(&self, group_id: i64, keywords: &str) -> Result<Vec<Album>>;

    async fn get_albums_count_by_keywords(&self, group_id: i64, keywords: &str) -> Result<i64>;

    async fn move_album_to_trash(&self, user_id: i64, album_id: i64) -> Result<Album>;

    async fn restore_album_from_trash(&self, user_id: i64, album_id: i64) -> Result<Album>;

    /// Validate and apply new field values to an existing album
    async fn update_album_with_fields(
        &self,
        user_id: i64,
        album_id: i64,
        fields: AlbumFields,
        context: ServiceContext,
    ) -> Result<Album>;

    /// Every album of a company in `[start, end)`, for reindexing
    async fn get_company_albums(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Album>>;
}

/// Remote album operations
#[async_trait]
pub trait AlbumService: Send + Sync {
    fn bean_identifier(&self) -> String;

    fn set_bean_identifier(&self, bean_identifier: String);

    async fn add_album(
        &self,
        artist_id: i64,
        name: String,
        year: i32,
        cover_image: Option<Vec<u8>>,
        context: ServiceContext,
    ) -> Result<Album>;

    async fn delete_album(&self, album_id: i64, context: ServiceContext) -> Result<Album>;

    async fn get_albums(&self, group_id: i64) -> Result<Vec<Album>>;

    async fn get_albums_page(&self, group_id: i64, start: i32, end: i32) -> Result<Vec<Album>>;

    async fn search_albums(&self, group_id: i64, keywords: &str) -> Result<Vec<Album>>;

    async fn get_albums_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<Vec<Album>>;

    async fn get_albums_count(&self, group_id: i64) -> Result<i64>;

    async fn search_albums_count(&self, group_id: i64, keywords: &str) -> Result<i64>;

    async fn get_albums_count_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<i64>;

    async fn move_album_to_trash(&self, album_id: i64) -> Result<Album>;

    async fn restore_album_from_trash(&self, album_id: i64) -> Result<Album>;

    async fn update_album(
        &self,
        album_id: i64,
        artist_id: i64,
        name: String,
        year: i32,
        cover_image: Option<Vec<u8>>,
        context: ServiceContext,
    ) -> Result<Album>;
}

/// Local artist operations
#[async_trait]
pub trait ArtistLocalService: Send + Sync {
    async fn add_artist(&self, name: String, bio: String, context: ServiceContext) -> Result<Artist>;

    async fn fetch_artist(&self, artist_id: i64) -> Result<Option<Artist>>;

    async fn get_artist(&self, artist_id: i64) -> Result<Artist>;

    async fn get_artists(&self, group_id: i64) -> Result<Vec<Artist>>;

    async fn get_artists_count(&self, group_id: i64) -> Result<i64>;

    async fn update_artist(&self, artist_id: i64, name: String, bio: String) -> Result<Artist>;

    async fn delete_artist(&self, artist_id: i64) -> Result<Artist>;
}

/// Local song operations
#[async_trait]
pub trait SongLocalService: Send + Sync {
    async fn add_song(&self, album_id: i64, name: String, context: ServiceContext) -> Result<Song>;

    async fn fetch_song(&self, song_id: i64) -> Result<Option<Song>>;

    async fn get_song(&self, song_id: i64) -> Result<Song>;

    async fn get_songs_by_album_id(&self, album_id: i64) -> Result<Vec<Song>>;

    async fn delete_song(&self, song_id: i64) -> Result<Song>;

    async fn move_song_to_trash(&self, user_id: i64, song_id: i64) -> Result<Song>;

    /// Every song of a company in `[start, end)`, for reindexing
    async fn get_company_songs(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Song>>;
}

/// Reject blank names and negative years
pub(crate) fn validate_album_fields(fields: &AlbumFields) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(jukebox_common::Error::InvalidInput(
            "Album name must not be blank".to_string(),
        ));
    }
    if fields.year < 0 {
        return Err(jukebox_common::Error::InvalidInput(format!(
            "Album year must not be negative: {}",
            fields.year
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, year: i32) -> AlbumFields {
        AlbumFields {
            artist_id: 1,
            name: name.to_string(),
            year,
            cover_image: None,
        }
    }

    #[test]
    fn test_validate_accepts_reasonable_album() {
        assert!(validate_album_fields(&fields("Blue Train", 1957)).is_ok());
        assert!(validate_album_fields(&fields("Unknown Year", 0)).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(matches!(
            validate_album_fields(&fields("   ", 1957)),
            Err(jukebox_common::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_year() {
        assert!(matches!(
            validate_album_fields(&fields("Blue Train", -1)),
            Err(jukebox_common::Error::InvalidInput(_))
        ));
    }
}
