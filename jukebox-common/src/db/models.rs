//! Catalog models
//!
//! Every catalog entry carries the same audit columns (uuid, group, company,
//! owning user, create/modified dates). Timestamps are stored as epoch
//! milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::time;

/// Workflow status of an album or song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Approved,
    InTrash,
}

impl EntryStatus {
    /// Integer code stored in the `status` column
    pub fn code(self) -> i32 {
        match self {
            EntryStatus::Approved => 0,
            EntryStatus::InTrash => 8,
        }
    }

    /// Decode a `status` column value
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EntryStatus::Approved),
            8 => Some(EntryStatus::InTrash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: i64,
    pub uuid: String,
    pub group_id: i64,
    pub company_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub create_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub name: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub album_id: i64,
    pub uuid: String,
    pub group_id: i64,
    pub company_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub create_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub artist_id: i64,
    pub name: String,
    pub year: i32,
    pub status: EntryStatus,
    pub status_by_user_id: i64,
    /// Raw cover image bytes, if one was uploaded
    pub cover_image: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub song_id: i64,
    pub uuid: String,
    pub group_id: i64,
    pub company_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub create_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub artist_id: i64,
    pub album_id: i64,
    pub name: String,
    pub status: EntryStatus,
}

impl Artist {
    /// Unsaved artist with the given primary key and fresh audit fields
    pub fn new(artist_id: i64) -> Self {
        let now = time::now();
        Self {
            artist_id,
            uuid: uuid::Uuid::new_v4().to_string(),
            group_id: 0,
            company_id: 0,
            user_id: 0,
            user_name: String::new(),
            create_date: now,
            modified_date: now,
            name: String::new(),
            bio: String::new(),
        }
    }
}

impl Album {
    /// Unsaved album with the given primary key and fresh audit fields
    pub fn new(album_id: i64) -> Self {
        let now = time::now();
        Self {
            album_id,
            uuid: uuid::Uuid::new_v4().to_string(),
            group_id: 0,
            company_id: 0,
            user_id: 0,
            user_name: String::new(),
            create_date: now,
            modified_date: now,
            artist_id: 0,
            name: String::new(),
            year: 0,
            status: EntryStatus::Approved,
            status_by_user_id: 0,
            cover_image: None,
        }
    }

    pub fn is_in_trash(&self) -> bool {
        self.status == EntryStatus::InTrash
    }
}

impl Song {
    /// Unsaved song with the given primary key and fresh audit fields
    pub fn new(song_id: i64) -> Self {
        let now = time::now();
        Self {
            song_id,
            uuid: uuid::Uuid::new_v4().to_string(),
            group_id: 0,
            company_id: 0,
            user_id: 0,
            user_name: String::new(),
            create_date: now,
            modified_date: now,
            artist_id: 0,
            album_id: 0,
            name: String::new(),
            status: EntryStatus::Approved,
        }
    }

    pub fn is_in_trash(&self) -> bool {
        self.status == EntryStatus::InTrash
    }
}

fn status_from_row(row: &SqliteRow) -> Result<EntryStatus, sqlx::Error> {
    let code: i32 = row.try_get("status")?;
    EntryStatus::from_code(code).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown status code {}", code).into(),
    })
}

impl<'r> FromRow<'r, SqliteRow> for Artist {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            artist_id: row.try_get("artist_id")?,
            uuid: row.try_get("uuid")?,
            group_id: row.try_get("group_id")?,
            company_id: row.try_get("company_id")?,
            user_id: row.try_get("user_id")?,
            user_name: row.try_get("user_name")?,
            create_date: time::from_millis(row.try_get("create_date")?),
            modified_date: time::from_millis(row.try_get("modified_date")?),
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Album {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            album_id: row.try_get("album_id")?,
            uuid: row.try_get("uuid")?,
            group_id: row.try_get("group_id")?,
            company_id: row.try_get("company_id")?,
            user_id: row.try_get("user_id")?,
            user_name: row.try_get("user_name")?,
            create_date: time::from_millis(row.try_get("create_date")?),
            modified_date: time::from_millis(row.try_get("modified_date")?),
            artist_id: row.try_get("artist_id")?,
            name: row.try_get("name")?,
            year: row.try_get("year")?,
            status: status_from_row(row)?,
            status_by_user_id: row.try_get("status_by_user_id")?,
            cover_image: row.try_get("cover_image")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Song {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            song_id: row.try_get("song_id")?,
            uuid: row.try_get("uuid")?,
            group_id: row.try_get("group_id")?,
            company_id: row.try_get("company_id")?,
            user_id: row.try_get("user_id")?,
            user_name: row.try_get("user_name")?,
            create_date: time::from_millis(row.try_get("create_date")?),
            modified_date: time::from_millis(row.try_get("modified_date")?),
            artist_id: row.try_get("artist_id")?,
            album_id: row.try_get("album_id")?,
            name: row.try_get("name")?,
            status: status_from_row(row)?,
        })
    }
}
