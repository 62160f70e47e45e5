use std::sync::Arc;

use crate::clp::{ClpResult, DispatchTable, Value};
use crate::clp_method;
use crate::service::{ServiceContext, SongLocalService};

/// Dispatches by name and signature onto a [`SongLocalService`]
pub struct SongLocalServiceClpInvoker {
    table: DispatchTable,
}

impl SongLocalServiceClpInvoker {
    pub fn new(service: Arc<dyn SongLocalService>) -> ClpResult<Self> {
        let builder = DispatchTable::builder();

        let builder = clp_method!(
            builder,
            service,
            "addSong",
            |s, album_id: i64, name: String, context: ServiceContext| s.add_song(album_id, name, context).await
        )?;
        let builder = clp_method!(builder, service, "fetchSong", |s, song_id: i64| {
            s.fetch_song(song_id).await
        })?;
        let builder = clp_method!(builder, service, "getSong", |s, song_id: i64| {
            s.get_song(song_id).await
        })?;
        let builder = clp_method!(builder, service, "getSongsByAlbumId", |s, album_id: i64| {
            s.get_songs_by_album_id(album_id).await
        })?;
        let builder = clp_method!(builder, service, "deleteSong", |s, song_id: i64| {
            s.delete_song(song_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "moveSongToTrash",
            |s, user_id: i64, song_id: i64| s.move_song_to_trash(user_id, song_id).await
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
