//! Album search documents

use async_trait::async_trait;
use jukebox_common::config::SearchConfig;
use jukebox_common::{Album, Result};
use std::collections::HashMap;
use std::sync::Arc;

use super::document::{field, BaseModel, Document};
use super::engine::{SearchEngine, SearchTerm};
use super::indexer::Indexer;
use crate::service::{AlbumLocalService, ArtistLocalService};

pub const PORTLET_ID: &str = "jukebox_albums";

const SEARCH_TERMS: &[SearchTerm] = &[
    SearchTerm::like(field::TITLE),
    SearchTerm::like("artist"),
    SearchTerm::exact("year"),
];

pub struct AlbumIndexer {
    albums: Arc<dyn AlbumLocalService>,
    artists: Arc<dyn ArtistLocalService>,
    engine: Arc<dyn SearchEngine>,
    settings: SearchConfig,
}

impl AlbumIndexer {
    pub fn new(
        albums: Arc<dyn AlbumLocalService>,
        artists: Arc<dyn ArtistLocalService>,
        engine: Arc<dyn SearchEngine>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            albums,
            artists,
            engine,
            settings,
        }
    }

    fn album_document(album: &Album, artist_name: &str) -> Document {
        let mut document = Document::for_model(PORTLET_ID, album);
        document.add_text(field::TITLE, album.name.as_str());
        document.add_keyword("year", album.year);
        document.add_text("artist", artist_name);
        document.add_keyword("artistId", album.artist_id);
        document
    }
}

#[async_trait]
impl Indexer for AlbumIndexer {
    fn class_name(&self) -> &'static str {
        Album::CLASS_NAME
    }

    fn portlet_id(&self) -> &'static str {
        PORTLET_ID
    }

    fn search_terms(&self) -> &'static [SearchTerm] {
        SEARCH_TERMS
    }

    fn engine(&self) -> &Arc<dyn SearchEngine> {
        &self.engine
    }

    fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    async fn document(&self, class_pk: i64) -> Result<Document> {
        let album = self.albums.get_album(class_pk).await?;
        let artist = self.artists.get_artist(album.artist_id).await?;
        Ok(Self::album_document(&album, &artist.name))
    }

    async fn company_documents(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Document>> {
        let albums = self.albums.get_company_albums(company_id, start, end).await?;

        let mut artist_names: HashMap<i64, String> = HashMap::new();
        let mut documents = Vec::with_capacity(albums.len());
        for album in &albums {
            if !artist_names.contains_key(&album.artist_id) {
                let artist = self.artists.get_artist(album.artist_id).await?;
                artist_names.insert(album.artist_id, artist.name);
            }
            let artist_name = artist_names
                .get(&album.artist_id)
                .map(String::as_str)
                .unwrap_or_default();
            documents.push(Self::album_document(album, artist_name));
        }
        Ok(documents)
    }

    async fn add_related_entry_fields(&self, document: &mut Document, class_pk: i64) -> Result<()> {
        let album = self.albums.get_album(class_pk).await?;
        document.add_keyword(field::CLASS_NAME_ID, Album::CLASS_NAME);
        document.add_keyword(field::CLASS_PK, album.album_id);
        document.add_keyword(field::RELATED_ENTRY, true);
        Ok(())
    }
}
