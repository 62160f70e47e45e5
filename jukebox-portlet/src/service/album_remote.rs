//! Remote album service
//!
//! Thin facade over [`AlbumLocalService`]: callers supply a service context
//! instead of a user id, and trash operations are attributed to the
//! principal the facade was opened for.

use async_trait::async_trait;
use jukebox_common::{Album, Result};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::{AlbumFields, AlbumLocalService, AlbumService, ServiceContext};

pub struct AlbumServiceImpl {
    local: Arc<dyn AlbumLocalService>,
    principal_user_id: i64,
    bean_identifier: RwLock<String>,
}

impl AlbumServiceImpl {
    pub fn new(local: Arc<dyn AlbumLocalService>, principal_user_id: i64) -> Self {
        Self {
            local,
            principal_user_id,
            bean_identifier: RwLock::new(String::new()),
        }
    }
}

#[async_trait]
impl AlbumService for AlbumServiceImpl {
    fn bean_identifier(&self) -> String {
        self.bean_identifier
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_bean_identifier(&self, bean_identifier: String) {
        *self
            .bean_identifier
            .write()
            .unwrap_or_else(PoisonError::into_inner) = bean_identifier;
    }

    async fn add_album(
        &self,
        artist_id: i64,
        name: String,
        year: i32,
        cover_image: Option<Vec<u8>>,
        context: ServiceContext,
    ) -> Result<Album> {
        let fields = AlbumFields {
            artist_id,
            name,
            year,
            cover_image,
        };
        self.local
            .add_album_with_fields(context.user_id, fields, context)
            .await
    }

    async fn delete_album(&self, album_id: i64, context: ServiceContext) -> Result<Album> {
        debug!("User {} deleting album {}", context.user_id, album_id);
        self.local.delete_album(album_id).await
    }

    async fn get_albums(&self, group_id: i64) -> Result<Vec<Album>> {
        self.local.get_albums(group_id).await
    }

    async fn get_albums_page(&self, group_id: i64, start: i32, end: i32) -> Result<Vec<Album>> {
        self.local.get_albums_page(group_id, start, end).await
    }

    async fn search_albums(&self, group_id: i64, keywords: &str) -> Result<Vec<Album>> {
        self.local.get_albums_by_keywords(group_id, keywords).await
    }

    async fn get_albums_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<Vec<Album>> {
        self.local
            .get_group_albums_by_artist_id(group_id, artist_id)
            .await
    }

    async fn get_albums_count(&self, group_id: i64) -> Result<i64> {
        self.local.get_albums_count(group_id).await
    }

    async fn search_albums_count(&self, group_id: i64, keywords: &str) -> Result<i64> {
        self.local.get_albums_count_by_keywords(group_id, keywords).await
    }

    async fn get_albums_count_by_artist_id(&self, group_id: i64, artist_id: i64) -> Result<i64> {
        self.local
            .get_group_albums_count_by_artist_id(group_id, artist_id)
            .await
    }

    async fn move_album_to_trash(&self, album_id: i64) -> Result<Album> {
        self.local
            .move_album_to_trash(self.principal_user_id, album_id)
            .await
    }

    async fn restore_album_from_trash(&self, album_id: i64) -> Result<Album> {
        self.local
            .restore_album_from_trash(self.principal_user_id, album_id)
            .await
    }

    async fn update_album(
        &self,
        album_id: i64,
        artist_id: i64,
        name: String,
        year: i32,
        cover_image: Option<Vec<u8>>,
        context: ServiceContext,
    ) -> Result<Album> {
        let fields = AlbumFields {
            artist_id,
            name,
            year,
            cover_image,
        };
        self.local
            .update_album_with_fields(context.user_id, album_id, fields, context)
            .await
    }
}
