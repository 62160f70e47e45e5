//! Song search documents

use async_trait::async_trait;
use jukebox_common::config::SearchConfig;
use jukebox_common::{Result, Song};
use std::collections::HashMap;
use std::sync::Arc;

use super::document::{field, BaseModel, Document};
use super::engine::{SearchEngine, SearchTerm};
use super::indexer::Indexer;
use crate::service::{AlbumLocalService, ArtistLocalService, SongLocalService};

pub const PORTLET_ID: &str = "jukebox_songs";

const SEARCH_TERMS: &[SearchTerm] = &[
    SearchTerm::like(field::TITLE),
    SearchTerm::like("album"),
    SearchTerm::like("artist"),
];

pub struct SongIndexer {
    songs: Arc<dyn SongLocalService>,
    albums: Arc<dyn AlbumLocalService>,
    artists: Arc<dyn ArtistLocalService>,
    engine: Arc<dyn SearchEngine>,
    settings: SearchConfig,
}

impl SongIndexer {
    pub fn new(
        songs: Arc<dyn SongLocalService>,
        albums: Arc<dyn AlbumLocalService>,
        artists: Arc<dyn ArtistLocalService>,
        engine: Arc<dyn SearchEngine>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            songs,
            albums,
            artists,
            engine,
            settings,
        }
    }

    async fn album_name(&self, cache: &mut HashMap<i64, String>, album_id: i64) -> Result<String> {
        if let Some(name) = cache.get(&album_id) {
            return Ok(name.clone());
        }
        let album = self.albums.get_album(album_id).await?;
        cache.insert(album_id, album.name.clone());
        Ok(album.name)
    }

    async fn artist_name(&self, cache: &mut HashMap<i64, String>, artist_id: i64) -> Result<String> {
        if let Some(name) = cache.get(&artist_id) {
            return Ok(name.clone());
        }
        let artist = self.artists.get_artist(artist_id).await?;
        cache.insert(artist_id, artist.name.clone());
        Ok(artist.name)
    }

    fn song_document(song: &Song, album_name: String, artist_name: String) -> Document {
        let mut document = Document::for_model(PORTLET_ID, song);
        document.add_text(field::TITLE, song.name.as_str());
        document.add_text("album", album_name);
        document.add_keyword("albumId", song.album_id);
        document.add_text("artist", artist_name);
        document.add_keyword("artistId", song.artist_id);
        document
    }
}

#[async_trait]
impl Indexer for SongIndexer {
    fn class_name(&self) -> &'static str {
        Song::CLASS_NAME
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
        let song = self.songs.get_song(class_pk).await?;
        let album = self.albums.get_album(song.album_id).await?;
        let artist = self.artists.get_artist(song.artist_id).await?;
        Ok(Self::song_document(&song, album.name, artist.name))
    }

    async fn company_documents(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Document>> {
        let songs = self.songs.get_company_songs(company_id, start, end).await?;

        let mut album_names = HashMap::new();
        let mut artist_names = HashMap::new();
        let mut documents = Vec::with_capacity(songs.len());
        for song in &songs {
            let album_name = self.album_name(&mut album_names, song.album_id).await?;
            let artist_name = self.artist_name(&mut artist_names, song.artist_id).await?;
            documents.push(Self::song_document(song, album_name, artist_name));
        }
        Ok(documents)
    }

    async fn add_related_entry_fields(&self, document: &mut Document, class_pk: i64) -> Result<()> {
        let song = self.songs.get_song(class_pk).await?;
        document.add_keyword(field::CLASS_NAME_ID, Song::CLASS_NAME);
        document.add_keyword(field::CLASS_PK, song.song_id);
        document.add_keyword(field::RELATED_ENTRY, true);
        Ok(())
    }
}
