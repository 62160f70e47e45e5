//! Search indexing for albums and songs

mod album_indexer;
mod document;
mod engine;
mod indexer;
mod song_indexer;

pub use album_indexer::{AlbumIndexer, PORTLET_ID as ALBUMS_PORTLET_ID};
pub use document::{field, uid, BaseModel, Document, FieldValue, Summary};
pub use engine::{InMemorySearchEngine, Query, SearchEngine, SearchTerm};
pub use indexer::{Indexer, IndexerRegistry};
pub use song_indexer::{SongIndexer, PORTLET_ID as SONGS_PORTLET_ID};
