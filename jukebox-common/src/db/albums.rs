//! Album queries

use crate::db::models::{Album, EntryStatus};
use crate::Result;
use sqlx::SqlitePool;

const SELECT_ALBUM: &str = "SELECT album_id, uuid, group_id, company_id, user_id, user_name, \
     create_date, modified_date, artist_id, name, year, status, status_by_user_id, cover_image \
     FROM albums";

/// Insert an album, returning it with its assigned primary key
///
/// A non-positive `album_id` lets SQLite allocate the key.
pub async fn insert(pool: &SqlitePool, album: &Album) -> Result<Album> {
    let requested_id = (album.album_id > 0).then_some(album.album_id);

    let result = sqlx::query(
        r#"
        INSERT INTO albums (
            album_id, uuid, group_id, company_id, user_id, user_name,
            create_date, modified_date, artist_id, name, year,
            status, status_by_user_id, cover_image
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(requested_id)
    .bind(&album.uuid)
    .bind(album.group_id)
    .bind(album.company_id)
    .bind(album.user_id)
    .bind(&album.user_name)
    .bind(album.create_date.timestamp_millis())
    .bind(album.modified_date.timestamp_millis())
    .bind(album.artist_id)
    .bind(&album.name)
    .bind(album.year)
    .bind(album.status.code())
    .bind(album.status_by_user_id)
    .bind(album.cover_image.as_deref())
    .execute(pool)
    .await?;

    let mut stored = album.clone();
    stored.album_id = result.last_insert_rowid();
    Ok(stored)
}

/// Overwrite every mutable column of an existing album
///
/// Returns `false` if no row has the album's primary key.
pub async fn update(pool: &SqlitePool, album: &Album) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE albums SET
            uuid = ?, group_id = ?, company_id = ?, user_id = ?, user_name = ?,
            create_date = ?, modified_date = ?, artist_id = ?, name = ?, year = ?,
            status = ?, status_by_user_id = ?, cover_image = ?
        WHERE album_id = ?
        "#,
    )
    .bind(&album.uuid)
    .bind(album.group_id)
    .bind(album.company_id)
    .bind(album.user_id)
    .bind(&album.user_name)
    .bind(album.create_date.timestamp_millis())
    .bind(album.modified_date.timestamp_millis())
    .bind(album.artist_id)
    .bind(&album.name)
    .bind(album.year)
    .bind(album.status.code())
    .bind(album.status_by_user_id)
    .bind(album.cover_image.as_deref())
    .bind(album.album_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an album by primary key; its songs are removed by cascade
pub async fn delete(pool: &SqlitePool, album_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE album_id = ?")
        .bind(album_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn find_by_id(pool: &SqlitePool, album_id: i64) -> Result<Option<Album>> {
    let album = sqlx::query_as::<_, Album>(&format!("{} WHERE album_id = ?", SELECT_ALBUM))
        .bind(album_id)
        .fetch_optional(pool)
        .await?;

    Ok(album)
}

pub async fn find_by_uuid_and_group(
    pool: &SqlitePool,
    uuid: &str,
    group_id: i64,
) -> Result<Option<Album>> {
    let album = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE uuid = ? AND group_id = ?",
        SELECT_ALBUM
    ))
    .bind(uuid)
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(album)
}

pub async fn list_by_uuid_and_company(
    pool: &SqlitePool,
    uuid: &str,
    company_id: i64,
) -> Result<Vec<Album>> {
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE uuid = ? AND company_id = ? ORDER BY album_id",
        SELECT_ALBUM
    ))
    .bind(uuid)
    .bind(company_id)
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

/// Albums ordered by primary key in the half-open position range `[start, end)`
pub async fn list_range(pool: &SqlitePool, start: i64, end: i64) -> Result<Vec<Album>> {
    let (limit, offset) = range_to_limit(start, end);
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} ORDER BY album_id LIMIT ? OFFSET ?",
        SELECT_ALBUM
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Albums of a group with the given status, ordered by name, in `[start, end)`
pub async fn list_by_group(
    pool: &SqlitePool,
    group_id: i64,
    status: EntryStatus,
    start: i64,
    end: i64,
) -> Result<Vec<Album>> {
    let (limit, offset) = range_to_limit(start, end);
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE group_id = ? AND status = ? ORDER BY name, album_id LIMIT ? OFFSET ?",
        SELECT_ALBUM
    ))
    .bind(group_id)
    .bind(status.code())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

/// Albums of a group whose name contains `keywords` (case-insensitive)
pub async fn list_by_group_and_name(
    pool: &SqlitePool,
    group_id: i64,
    keywords: &str,
    status: EntryStatus,
) -> Result<Vec<Album>> {
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE group_id = ? AND status = ? AND name LIKE ? ESCAPE '\\' \
         ORDER BY name, album_id",
        SELECT_ALBUM
    ))
    .bind(group_id)
    .bind(status.code())
    .bind(like_pattern(keywords))
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

pub async fn count_by_group(pool: &SqlitePool, group_id: i64, status: EntryStatus) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM albums WHERE group_id = ? AND status = ?")
            .bind(group_id)
            .bind(status.code())
            .fetch_one(pool)
            .await?;

    Ok(count)
}

pub async fn count_by_group_and_name(
    pool: &SqlitePool,
    group_id: i64,
    keywords: &str,
    status: EntryStatus,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM albums WHERE group_id = ? AND status = ? AND name LIKE ? ESCAPE '\\'",
    )
    .bind(group_id)
    .bind(status.code())
    .bind(like_pattern(keywords))
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Albums by an artist; `group_id` of `None` spans every group
pub async fn list_by_artist(
    pool: &SqlitePool,
    group_id: Option<i64>,
    artist_id: i64,
    status: EntryStatus,
) -> Result<Vec<Album>> {
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE (? IS NULL OR group_id = ?) AND artist_id = ? AND status = ? \
         ORDER BY year, name, album_id",
        SELECT_ALBUM
    ))
    .bind(group_id)
    .bind(group_id)
    .bind(artist_id)
    .bind(status.code())
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

pub async fn count_by_artist(
    pool: &SqlitePool,
    group_id: i64,
    artist_id: i64,
    status: EntryStatus,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM albums WHERE group_id = ? AND artist_id = ? AND status = ?",
    )
    .bind(group_id)
    .bind(artist_id)
    .bind(status.code())
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Every album of a company, ordered by primary key, in `[start, end)`
pub async fn list_by_company(
    pool: &SqlitePool,
    company_id: i64,
    start: i64,
    end: i64,
) -> Result<Vec<Album>> {
    let (limit, offset) = range_to_limit(start, end);
    let albums = sqlx::query_as::<_, Album>(&format!(
        "{} WHERE company_id = ? ORDER BY album_id LIMIT ? OFFSET ?",
        SELECT_ALBUM
    ))
    .bind(company_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(albums)
}

/// Primary keys of every album in a group, any status
pub async fn ids_by_group(pool: &SqlitePool, group_id: i64) -> Result<Vec<i64>> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT album_id FROM albums WHERE group_id = ? ORDER BY album_id")
            .bind(group_id)
            .fetch_all(pool)
            .await?;

    Ok(ids)
}

/// Convert a `[start, end)` position range into SQLite `LIMIT`/`OFFSET`
///
/// A negative bound means "unbounded" on that side.
pub(crate) fn range_to_limit(start: i64, end: i64) -> (i64, i64) {
    let offset = start.max(0);
    if end < 0 {
        (-1, offset)
    } else {
        ((end - offset).max(0), offset)
    }
}

/// `%keywords%` with LIKE wildcards in the input escaped
pub(crate) fn like_pattern(keywords: &str) -> String {
    let escaped = keywords
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
