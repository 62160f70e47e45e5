//! Database initialization
//!
//! Opens (or creates) the catalog database and creates the catalog tables
//! if they are missing. Every step is idempotent so the same file can be
//! opened any number of times.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Name of the catalog database file inside the root folder
pub const DATABASE_FILE_NAME: &str = "jukebox.db";

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL lets indexer reads proceed while a service call writes
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_artists_table(&pool).await?;
    create_albums_table(&pool).await?;
    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Create the artists table
pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            artist_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL,
            group_id INTEGER NOT NULL,
            company_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            create_date INTEGER NOT NULL,
            modified_date INTEGER NOT NULL,
            name TEXT NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            UNIQUE (uuid, group_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artists_group ON artists(group_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the albums table
///
/// `status` holds the workflow status code (0 approved, 8 in trash).
pub async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            album_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL,
            group_id INTEGER NOT NULL,
            company_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            create_date INTEGER NOT NULL,
            modified_date INTEGER NOT NULL,
            artist_id INTEGER NOT NULL REFERENCES artists(artist_id),
            name TEXT NOT NULL,
            year INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 0,
            status_by_user_id INTEGER NOT NULL DEFAULT 0,
            cover_image BLOB,
            UNIQUE (uuid, group_id),
            CHECK (year >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_group ON albums(group_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the songs table
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            song_id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL,
            group_id INTEGER NOT NULL,
            company_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            create_date INTEGER NOT NULL,
            modified_date INTEGER NOT NULL,
            artist_id INTEGER NOT NULL REFERENCES artists(artist_id),
            album_id INTEGER NOT NULL REFERENCES albums(album_id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 0,
            trashed_with_album INTEGER NOT NULL DEFAULT 0,
            UNIQUE (uuid, group_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_album ON songs(album_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_company ON songs(company_id)")
        .execute(pool)
        .await?;

    Ok(())
}
