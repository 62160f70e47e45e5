//! Artist queries

use crate::db::models::Artist;
use crate::Result;
use sqlx::SqlitePool;

const SELECT_ARTIST: &str = "SELECT artist_id, uuid, group_id, company_id, user_id, user_name, \
     create_date, modified_date, name, bio FROM artists";

/// Insert an artist, returning it with its assigned primary key
pub async fn insert(pool: &SqlitePool, artist: &Artist) -> Result<Artist> {
    let requested_id = (artist.artist_id > 0).then_some(artist.artist_id);

    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            artist_id, uuid, group_id, company_id, user_id, user_name,
            create_date, modified_date, name, bio
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(requested_id)
    .bind(&artist.uuid)
    .bind(artist.group_id)
    .bind(artist.company_id)
    .bind(artist.user_id)
    .bind(&artist.user_name)
    .bind(artist.create_date.timestamp_millis())
    .bind(artist.modified_date.timestamp_millis())
    .bind(&artist.name)
    .bind(&artist.bio)
    .execute(pool)
    .await?;

    let mut stored = artist.clone();
    stored.artist_id = result.last_insert_rowid();
    Ok(stored)
}

pub async fn update(pool: &SqlitePool, artist: &Artist) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            uuid = ?, group_id = ?, company_id = ?, user_id = ?, user_name = ?,
            create_date = ?, modified_date = ?, name = ?, bio = ?
        WHERE artist_id = ?
        "#,
    )
    .bind(&artist.uuid)
    .bind(artist.group_id)
    .bind(artist.company_id)
    .bind(artist.user_id)
    .bind(&artist.user_name)
    .bind(artist.create_date.timestamp_millis())
    .bind(artist.modified_date.timestamp_millis())
    .bind(&artist.name)
    .bind(&artist.bio)
    .bind(artist.artist_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, artist_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE artist_id = ?")
        .bind(artist_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn find_by_id(pool: &SqlitePool, artist_id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!("{} WHERE artist_id = ?", SELECT_ARTIST))
        .bind(artist_id)
        .fetch_optional(pool)
        .await?;

    Ok(artist)
}

pub async fn list_by_group(pool: &SqlitePool, group_id: i64) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(&format!(
        "{} WHERE group_id = ? ORDER BY name, artist_id",
        SELECT_ARTIST
    ))
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

pub async fn count_by_group(pool: &SqlitePool, group_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE group_id = ?")
        .bind(group_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
