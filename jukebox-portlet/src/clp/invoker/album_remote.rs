use std::sync::Arc;

use crate::clp::{ClpResult, DispatchTable, Value};
use crate::clp_method;
use crate::service::{AlbumService, ServiceContext};

/// Dispatches by name and signature onto the remote [`AlbumService`]
pub struct AlbumServiceClpInvoker {
    table: DispatchTable,
}

impl AlbumServiceClpInvoker {
    pub fn new(service: Arc<dyn AlbumService>) -> ClpResult<Self> {
        let builder = DispatchTable::builder();

        let builder = clp_method!(builder, service, "getBeanIdentifier", |s| {
            Ok(s.bean_identifier())
        })?;
        let builder = clp_method!(builder, service, "setBeanIdentifier", |s, bean_identifier: String| {
            s.set_bean_identifier(bean_identifier);
            Ok(())
        })?;
        let builder = clp_method!(
            builder,
            service,
            "addAlbum",
            |s,
             artist_id: i64,
             name: String,
             year: i32,
             cover_image: Option<Vec<u8>>,
             context: ServiceContext| {
                s.add_album(artist_id, name, year, cover_image, context).await
            }
        )?;
        let builder = clp_method!(
            builder,
            service,
            "deleteAlbum",
            |s, album_id: i64, context: ServiceContext| s.delete_album(album_id, context).await
        )?;
        let builder = clp_method!(builder, service, "getAlbums", |s, group_id: i64| {
            s.get_albums(group_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbums",
            |s, group_id: i64, start: i32, end: i32| s.get_albums_page(group_id, start, end).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbums",
            |s, group_id: i64, keywords: String| s.search_albums(group_id, &keywords).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbumsByArtistId",
            |s, group_id: i64, artist_id: i64| s.get_albums_by_artist_id(group_id, artist_id).await
        )?;
        let builder = clp_method!(builder, service, "getAlbumsCount", |s, group_id: i64| {
            s.get_albums_count(group_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbumsCount",
            |s, group_id: i64, keywords: String| s.search_albums_count(group_id, &keywords).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbumsCountByArtistId",
            |s, group_id: i64, artist_id: i64| s.get_albums_count_by_artist_id(group_id, artist_id).await
        )?;
        let builder = clp_method!(builder, service, "moveAlbumToTrash", |s, album_id: i64| {
            s.move_album_to_trash(album_id).await
        })?;
        let builder = clp_method!(builder, service, "restoreAlbumFromTrash", |s, album_id: i64| {
            s.restore_album_from_trash(album_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "updateAlbum",
            |s,
             album_id: i64,
             artist_id: i64,
             name: String,
             year: i32,
             cover_image: Option<Vec<u8>>,
             context: ServiceContext| {
                s.update_album(album_id, artist_id, name, year, cover_image, context)
                    .await
            }
        )?;

        Ok(Self {
            table: builder.build(),
        })
    }

    pub async fn invoke_method<S: AsRef<str>>(
        &self,
        name: &str,
        parameter_types: &[S],
        arguments: Vec<Value>,
    ) -> ClpResult<Value> {
        self.table.invoke(name, parameter_types, arguments).await
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn into_table(self) -> DispatchTable {
        self.table
    }
}
