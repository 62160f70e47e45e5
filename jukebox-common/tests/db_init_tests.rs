//! Tests for database initialization and the catalog queries

use jukebox_common::db::{albums, artists, init::init_database, songs};
use jukebox_common::{Album, Artist, EntryStatus, Song};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn fresh_pool(temp_dir: &TempDir) -> SqlitePool {
    init_database(&temp_dir.path().join("jukebox.db"))
        .await
        .expect("database should initialize")
}

async fn seed_artist(pool: &SqlitePool, group_id: i64, name: &str) -> Artist {
    let mut artist = Artist::new(0);
    artist.group_id = group_id;
    artist.company_id = 1;
    artist.name = name.to_string();
    artists::insert(pool, &artist).await.unwrap()
}

async fn seed_album(pool: &SqlitePool, artist: &Artist, name: &str, year: i32) -> Album {
    let mut album = Album::new(0);
    album.group_id = artist.group_id;
    album.company_id = artist.company_id;
    album.artist_id = artist.artist_id;
    album.name = name.to_string();
    album.year = year;
    albums::insert(pool, &album).await.unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("jukebox.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("jukebox.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_catalog_tables_created() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;

    for table in ["artists", "albums", "songs"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists, "table {} missing", table);
    }
}

#[tokio::test]
async fn test_album_insert_and_find_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "The Beatles").await;

    let mut album = Album::new(0);
    album.group_id = 10;
    album.company_id = 1;
    album.artist_id = artist.artist_id;
    album.name = "Abbey Road".to_string();
    album.year = 1969;
    album.cover_image = Some(vec![0xFF, 0xD8, 0xFF]);

    let stored = albums::insert(&pool, &album).await.unwrap();
    assert!(stored.album_id > 0);

    let found = albums::find_by_id(&pool, stored.album_id).await.unwrap();
    assert_eq!(found, Some(stored.clone()));

    let by_uuid = albums::find_by_uuid_and_group(&pool, &stored.uuid, 10)
        .await
        .unwrap();
    assert_eq!(by_uuid, Some(stored));
}

#[tokio::test]
async fn test_album_explicit_primary_key_kept() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Nina Simone").await;

    let mut album = Album::new(4242);
    album.group_id = 10;
    album.artist_id = artist.artist_id;
    album.name = "Pastel Blues".to_string();

    let stored = albums::insert(&pool, &album).await.unwrap();
    assert_eq!(stored.album_id, 4242);
}

#[tokio::test]
async fn test_album_group_listing_filters_status_and_pages() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Miles Davis").await;

    seed_album(&pool, &artist, "Kind of Blue", 1959).await;
    seed_album(&pool, &artist, "Bitches Brew", 1970).await;
    let mut trashed = seed_album(&pool, &artist, "Agharta", 1975).await;
    trashed.status = EntryStatus::InTrash;
    assert!(albums::update(&pool, &trashed).await.unwrap());

    let approved = albums::list_by_group(&pool, 10, EntryStatus::Approved, -1, -1)
        .await
        .unwrap();
    let names: Vec<_> = approved.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Bitches Brew", "Kind of Blue"]);

    let first_page = albums::list_by_group(&pool, 10, EntryStatus::Approved, 0, 1)
        .await
        .unwrap();
    assert_eq!(first_page.len(), 1);
    assert_eq!(first_page[0].name, "Bitches Brew");

    assert_eq!(
        albums::count_by_group(&pool, 10, EntryStatus::Approved).await.unwrap(),
        2
    );
    assert_eq!(
        albums::count_by_group(&pool, 10, EntryStatus::InTrash).await.unwrap(),
        1
    );
    assert_eq!(albums::count(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_album_name_search_is_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Radiohead").await;

    seed_album(&pool, &artist, "OK Computer", 1997).await;
    seed_album(&pool, &artist, "Kid A", 2000).await;

    let found = albums::list_by_group_and_name(&pool, 10, "computer", EntryStatus::Approved)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "OK Computer");

    let count = albums::count_by_group_and_name(&pool, 10, "%", EntryStatus::Approved)
        .await
        .unwrap();
    assert_eq!(count, 0, "LIKE wildcards in keywords must be literal");
}

#[tokio::test]
async fn test_album_delete_cascades_to_songs() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Björk").await;
    let album = seed_album(&pool, &artist, "Homogenic", 1997).await;

    let mut song = Song::new(0);
    song.group_id = 10;
    song.company_id = 1;
    song.artist_id = artist.artist_id;
    song.album_id = album.album_id;
    song.name = "Jóga".to_string();
    let song = songs::insert(&pool, &song).await.unwrap();

    assert!(albums::delete(&pool, album.album_id).await.unwrap());
    assert_eq!(songs::find_by_id(&pool, song.song_id).await.unwrap(), None);
    assert!(!albums::delete(&pool, album.album_id).await.unwrap());
}

async fn seed_song(pool: &SqlitePool, album: &Album, name: &str) -> Song {
    let mut song = Song::new(0);
    song.group_id = album.group_id;
    song.company_id = album.company_id;
    song.artist_id = album.artist_id;
    song.album_id = album.album_id;
    song.name = name.to_string();
    songs::insert(pool, &song).await.unwrap()
}

#[tokio::test]
async fn test_song_status_follows_album() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Portishead").await;
    let album = seed_album(&pool, &artist, "Dummy", 1994).await;

    for name in ["Mysterons", "Sour Times", "Roads"] {
        seed_song(&pool, &album, name).await;
    }

    let changed = songs::trash_by_album(&pool, album.album_id).await.unwrap();
    assert_eq!(changed, 3);

    let approved = songs::list_by_album(&pool, album.album_id, EntryStatus::Approved)
        .await
        .unwrap();
    assert!(approved.is_empty());

    let company_songs = songs::list_by_company(&pool, 1, 0, 2).await.unwrap();
    assert_eq!(company_songs.len(), 2);

    let restored = songs::restore_by_album(&pool, album.album_id).await.unwrap();
    assert_eq!(restored, 3);
}

#[tokio::test]
async fn test_album_restore_leaves_separately_trashed_songs() {
    let temp_dir = TempDir::new().unwrap();
    let pool = fresh_pool(&temp_dir).await;
    let artist = seed_artist(&pool, 10, "Portishead").await;
    let album = seed_album(&pool, &artist, "Dummy", 1994).await;

    let mut roads = seed_song(&pool, &album, "Roads").await;
    seed_song(&pool, &album, "Glory Box").await;
    roads.status = EntryStatus::InTrash;
    assert!(songs::update(&pool, &roads).await.unwrap());

    assert_eq!(songs::trash_by_album(&pool, album.album_id).await.unwrap(), 1);
    assert_eq!(songs::restore_by_album(&pool, album.album_id).await.unwrap(), 1);

    let roads = songs::find_by_id(&pool, roads.song_id).await.unwrap().unwrap();
    assert_eq!(roads.status, EntryStatus::InTrash);
    let approved = songs::list_by_album(&pool, album.album_id, EntryStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].name, "Glory Box");

    // A second restore has nothing left to bring back
    assert_eq!(songs::restore_by_album(&pool, album.album_id).await.unwrap(), 0);
}
