//! Song queries

use crate::db::albums::range_to_limit;
use crate::db::models::{EntryStatus, Song};
use crate::Result;
use sqlx::SqlitePool;

const SELECT_SONG: &str = "SELECT song_id, uuid, group_id, company_id, user_id, user_name, \
     create_date, modified_date, artist_id, album_id, name, status FROM songs";

/// Insert a song, returning it with its assigned primary key
pub async fn insert(pool: &SqlitePool, song: &Song) -> Result<Song> {
    let requested_id = (song.song_id > 0).then_some(song.song_id);

    let result = sqlx::query(
        r#"
        INSERT INTO songs (
            song_id, uuid, group_id, company_id, user_id, user_name,
            create_date, modified_date, artist_id, album_id, name, status
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(requested_id)
    .bind(&song.uuid)
    .bind(song.group_id)
    .bind(song.company_id)
    .bind(song.user_id)
    .bind(&song.user_name)
    .bind(song.create_date.timestamp_millis())
    .bind(song.modified_date.timestamp_millis())
    .bind(song.artist_id)
    .bind(song.album_id)
    .bind(&song.name)
    .bind(song.status.code())
    .execute(pool)
    .await?;

    let mut stored = song.clone();
    stored.song_id = result.last_insert_rowid();
    Ok(stored)
}

pub async fn update(pool: &SqlitePool, song: &Song) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE songs SET
            uuid = ?, group_id = ?, company_id = ?, user_id = ?, user_name = ?,
            create_date = ?, modified_date = ?, artist_id = ?, album_id = ?,
            name = ?, status = ?
        WHERE song_id = ?
        "#,
    )
    .bind(&song.uuid)
    .bind(song.group_id)
    .bind(song.company_id)
    .bind(song.user_id)
    .bind(&song.user_name)
    .bind(song.create_date.timestamp_millis())
    .bind(song.modified_date.timestamp_millis())
    .bind(song.artist_id)
    .bind(song.album_id)
    .bind(&song.name)
    .bind(song.status.code())
    .bind(song.song_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, song_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE song_id = ?")
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn find_by_id(pool: &SqlitePool, song_id: i64) -> Result<Option<Song>> {
    let song = sqlx::query_as::<_, Song>(&format!("{} WHERE song_id = ?", SELECT_SONG))
        .bind(song_id)
        .fetch_optional(pool)
        .await?;

    Ok(song)
}

pub async fn list_by_album(
    pool: &SqlitePool,
    album_id: i64,
    status: EntryStatus,
) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(&format!(
        "{} WHERE album_id = ? AND status = ? ORDER BY song_id",
        SELECT_SONG
    ))
    .bind(album_id)
    .bind(status.code())
    .fetch_all(pool)
    .await?;

    Ok(songs)
}

/// Every song of a company, ordered by primary key, in `[start, end)`
pub async fn list_by_company(
    pool: &SqlitePool,
    company_id: i64,
    start: i64,
    end: i64,
) -> Result<Vec<Song>> {
    let (limit, offset) = range_to_limit(start, end);
    let songs = sqlx::query_as::<_, Song>(&format!(
        "{} WHERE company_id = ? ORDER BY song_id LIMIT ? OFFSET ?",
        SELECT_SONG
    ))
    .bind(company_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(songs)
}

/// Trash the approved songs of an album, marking them as trashed with it
///
/// Songs already in the trash keep their own status and are not marked.
pub async fn trash_by_album(pool: &SqlitePool, album_id: i64) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE songs SET status = ?, trashed_with_album = 1 WHERE album_id = ? AND status = ?",
    )
    .bind(EntryStatus::InTrash.code())
    .bind(album_id)
    .bind(EntryStatus::Approved.code())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Restore only the songs that went to the trash with their album
pub async fn restore_by_album(pool: &SqlitePool, album_id: i64) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE songs SET status = ?, trashed_with_album = 0 WHERE album_id = ? AND trashed_with_album = 1",
    )
    .bind(EntryStatus::Approved.code())
    .bind(album_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
