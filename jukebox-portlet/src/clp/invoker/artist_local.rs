use std::sync::Arc;

use crate::clp::{ClpResult, DispatchTable, Value};
use crate::clp_method;
use crate::service::{ArtistLocalService, ServiceContext};

/// Dispatches by name and signature onto an [`ArtistLocalService`]
pub struct ArtistLocalServiceClpInvoker {
    table: DispatchTable,
}

impl ArtistLocalServiceClpInvoker {
    pub fn new(service: Arc<dyn ArtistLocalService>) -> ClpResult<Self> {
        let builder = DispatchTable::builder();

        let builder = clp_method!(
            builder,
            service,
            "addArtist",
            |s, name: String, bio: String, context: ServiceContext| s.add_artist(name, bio, context).await
        )?;
        let builder = clp_method!(builder, service, "fetchArtist", |s, artist_id: i64| {
            s.fetch_artist(artist_id).await
        })?;
        let builder = clp_method!(builder, service, "getArtist", |s, artist_id: i64| {
            s.get_artist(artist_id).await
        })?;
        let builder = clp_method!(builder, service, "getArtists", |s, group_id: i64| {
            s.get_artists(group_id).await
        })?;
        let builder = clp_method!(builder, service, "getArtistsCount", |s, group_id: i64| {
            s.get_artists_count(group_id).await
        })?;
        let builder = clp_method!(
            builder,
            service,
            "updateArtist",
            |s, artist_id: i64, name: String, bio: String| s.update_artist(artist_id, name, bio).await
        )?;
        let builder = clp_method!(builder, service, "deleteArtist", |s, artist_id: i64| {
            s.delete_artist(artist_id).await
        })?;

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
