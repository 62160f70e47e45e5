use std::sync::Arc;

use jukebox_common::Album;

use crate::clp::{ClpResult, DispatchTable, Value};
use crate::clp_method;
use crate::service::{AlbumFields, AlbumLocalService, ServiceContext};

/// Dispatches by name and signature onto an [`AlbumLocalService`]
pub struct AlbumLocalServiceClpInvoker {
    table: DispatchTable,
}

impl AlbumLocalServiceClpInvoker {
    pub fn new(service: Arc<dyn AlbumLocalService>) -> ClpResult<Self> {
        let builder = DispatchTable::builder();

        // Entity-level access
        let builder = clp_method!(builder, service, "addAlbum", |s, album: Album| {
            s.add_album(album).await
        })?;
        let builder = clp_method!(builder, service, "createAlbum", |s, album_id: i64| {
            Ok(s.create_album(album_id))
        })?;
        let builder = clp_method!(builder, service, "deleteAlbum", |s, album_id: i64| {
            s.delete_album(album_id).await
        })?;
        let builder = clp_method!(builder, service, "deleteAlbum", |s, album: Album| {
            s.delete_album_entry(album).await
        })?;
        let builder = clp_method!(builder, service, "fetchAlbum", |s, album_id: i64| {
            s.fetch_album(album_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "fetchAlbumByUuidAndGroupId",
            |s, uuid: String, group_id: i64| s.fetch_album_by_uuid_and_group_id(&uuid, group_id).await
        )?;
        let builder = clp_method!(builder, service, "getAlbum", |s, album_id: i64| {
            s.get_album(album_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbumsByUuidAndCompanyId",
            |s, uuid: String, company_id: i64| s.get_albums_by_uuid_and_company_id(&uuid, company_id).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbumByUuidAndGroupId",
            |s, uuid: String, group_id: i64| s.get_album_by_uuid_and_group_id(&uuid, group_id).await
        )?;
        let builder = clp_method!(builder, service, "getAlbums", |s, start: i32, end: i32| {
            s.get_albums_range(start, end).await
        })?;
        let builder = clp_method!(builder, service, "getAlbumsCount", |s| {
            s.get_albums_total().await
        })?;
        let builder = clp_method!(builder, service, "updateAlbum", |s, album: Album| {
            s.update_album(album).await
        })?;
        let builder = clp_method!(builder, service, "getOSGiServiceIdentifier", |s| {
            Ok(s.osgi_service_identifier())
        })?;

        // Catalog operations
        let builder = clp_method!(
            builder,
            service,
            "addAlbum",
            |s,
             user_id: i64,
             artist_id: i64,
             name: String,
             year: i32,
             cover_image: Option<Vec<u8>>,
             context: ServiceContext| {
                let fields = AlbumFields {
                    artist_id,
                    name,
                    year,
                    cover_image,
                };
                s.add_album_with_fields(user_id, fields, context).await
            }
        )?;
        let builder = clp_method!(builder, service, "deleteAlbums", |s, group_id: i64| {
            s.delete_albums(group_id).await
        })?;
        let builder = clp_method!(builder, service, "getAlbums", |s, group_id: i64| {
            s.get_albums(group_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "getAlbums",
            |s, group_id: i64, start: i32, end: i32| s.get_albums_page(group_id, start, end).await
        )?;
        let builder = clp_method!(builder, service, "getAlbumsByArtistId", |s, artist_id: i64| {
            s.get_albums_by_artist_id(artist_id).await
        })?;
        let builder = clp_method!(builder, service, "getAlbumsCount", |s, group_id: i64| {
            s.get_albums_count(group_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "moveAlbumToTrash",
            |s, user_id: i64, album_id: i64| s.move_album_to_trash(user_id, album_id).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "restoreAlbumFromTrash",
            |s, user_id: i64, album_id: i64| s.restore_album_from_trash(user_id, album_id).await
        )?;
        let builder = clp_method!(
            builder,
            service,
            "updateAlbum",
            |s,
             user_id: i64,
             album_id: i64,
             artist_id: i64,
             name: String,
             year: i32,
             cover_image: Option<Vec<u8>>,
             context: ServiceContext| {
                let fields = AlbumFields {
                    artist_id,
                    name,
                    year,
                    cover_image,
                };
                s.update_album_with_fields(user_id, album_id, fields, context).await
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
