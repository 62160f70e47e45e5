//! Search documents
//!
//! A [`Document`] is the flat field map handed to a search engine for one
//! catalog entry. Field names follow the portal's conventions so documents
//! from different entry types can be filtered uniformly.

use chrono::{DateTime, Utc};
use jukebox_common::{Album, Artist, EntryStatus, Song};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clp::type_tag;

/// Well-known field names
pub mod field {
    pub const UID: &str = "uid";
    pub const ENTRY_CLASS_NAME: &str = "entryClassName";
    pub const ENTRY_CLASS_PK: &str = "entryClassPK";
    pub const COMPANY_ID: &str = "companyId";
    pub const GROUP_ID: &str = "groupId";
    pub const USER_ID: &str = "userId";
    pub const USER_NAME: &str = "userName";
    pub const CREATE_DATE: &str = "createDate";
    pub const MODIFIED_DATE: &str = "modified";
    pub const STATUS: &str = "status";
    pub const UUID: &str = "uuid";
    pub const PORTLET_ID: &str = "portletId";
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const CLASS_NAME_ID: &str = "classNameId";
    pub const CLASS_PK: &str = "classPK";
    pub const RELATED_ENTRY: &str = "relatedEntry";
}

/// Indexed field value
///
/// Keywords match exactly, text matches by substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Keyword(String),
    Text(String),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// String form used for matching
    pub fn as_string(&self) -> String {
        match self {
            FieldValue::Keyword(s) | FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document pre-filled with the audit fields shared by every entry
    pub fn for_model<M: BaseModel>(portlet_id: &str, model: &M) -> Self {
        let mut document = Self::new();
        let class_pk = model.primary_key();

        document.add_keyword(field::UID, uid(M::CLASS_NAME, class_pk));
        document.add_keyword(field::ENTRY_CLASS_NAME, M::CLASS_NAME);
        document.add_keyword(field::ENTRY_CLASS_PK, class_pk);
        document.add_keyword(field::COMPANY_ID, model.company_id());
        document.add_keyword(field::GROUP_ID, model.group_id());
        document.add_keyword(field::USER_ID, model.user_id());
        document.add_text(field::USER_NAME, model.user_name());
        document.add_date(field::CREATE_DATE, model.create_date());
        document.add_date(field::MODIFIED_DATE, model.modified_date());
        document.add_keyword(field::STATUS, model.status().code());
        document.add_keyword(field::UUID, model.uuid());
        document.add_keyword(field::PORTLET_ID, portlet_id);
        document
    }

    pub fn add_keyword(&mut self, name: &str, value: impl ToString) {
        self.fields
            .insert(name.to_string(), FieldValue::Keyword(value.to_string()));
    }

    pub fn add_text(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    pub fn add_date(&mut self, name: &str, value: DateTime<Utc>) {
        self.fields.insert(name.to_string(), FieldValue::Date(value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).map(FieldValue::as_string)
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(FieldValue::Keyword(s)) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn uid(&self) -> Option<String> {
        self.get_string(field::UID)
    }

    pub fn company_id(&self) -> Option<i64> {
        self.get_long(field::COMPANY_ID)
    }

    pub fn status(&self) -> Option<EntryStatus> {
        self.get_long(field::STATUS)
            .and_then(|code| i32::try_from(code).ok())
            .and_then(EntryStatus::from_code)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Unique document id for an entry
pub fn uid(class_name: &str, class_pk: i64) -> String {
    format!("{}_PORTLET_{}", class_name, class_pk)
}

/// Audit fields every indexed catalog entry exposes
pub trait BaseModel {
    const CLASS_NAME: &'static str;

    fn primary_key(&self) -> i64;
    fn uuid(&self) -> &str;
    fn company_id(&self) -> i64;
    fn group_id(&self) -> i64;
    fn user_id(&self) -> i64;
    fn user_name(&self) -> &str;
    fn create_date(&self) -> DateTime<Utc>;
    fn modified_date(&self) -> DateTime<Utc>;
    fn status(&self) -> EntryStatus;
}

macro_rules! impl_base_model {
    ($model:ty, $class_name:expr, $pk:ident, |$m:ident| $status:expr) => {
        impl BaseModel for $model {
            const CLASS_NAME: &'static str = $class_name;

            fn primary_key(&self) -> i64 {
                self.$pk
            }
            fn uuid(&self) -> &str {
                &self.uuid
            }
            fn company_id(&self) -> i64 {
                self.company_id
            }
            fn group_id(&self) -> i64 {
                self.group_id
            }
            fn user_id(&self) -> i64 {
                self.user_id
            }
            fn user_name(&self) -> &str {
                &self.user_name
            }
            fn create_date(&self) -> DateTime<Utc> {
                self.create_date
            }
            fn modified_date(&self) -> DateTime<Utc> {
                self.modified_date
            }
            fn status(&self) -> EntryStatus {
                let $m = self;
                $status
            }
        }
    };
}

impl_base_model!(Album, type_tag::ALBUM, album_id, |album| album.status);
impl_base_model!(Song, type_tag::SONG, song_id, |song| song.status);
// Artists have no workflow
impl_base_model!(Artist, type_tag::ARTIST, artist_id, |_artist| EntryStatus::Approved);

/// Title and content shown for a search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub content: String,
}

impl Summary {
    /// Summary from the document's title and content fields
    ///
    /// Content longer than `max_content_length` characters is cut and
    /// suffixed with `...`.
    pub fn from_document(document: &Document, max_content_length: usize) -> Self {
        let title = document.get_string(field::TITLE).unwrap_or_default();
        let content = document.get_string(field::CONTENT).unwrap_or_default();

        Self {
            title,
            content: shorten(&content, max_content_length),
        }
    }
}

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_length` chars, ending in an ellipsis when it fits
fn shorten(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length < ELLIPSIS.len() {
        return text.chars().take(max_length).collect();
    }

    let keep = max_length - ELLIPSIS.len();
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_model_fills_audit_fields() {
        let mut album = Album::new(12);
        album.company_id = 1;
        album.group_id = 20;
        album.user_id = 5;

        let document = Document::for_model("jukebox_albums", &album);

        assert_eq!(document.uid(), Some("jukebox.model.Album_PORTLET_12".to_string()));
        assert_eq!(document.company_id(), Some(1));
        assert_eq!(document.get_long(field::GROUP_ID), Some(20));
        assert_eq!(document.get_long(field::ENTRY_CLASS_PK), Some(12));
        assert_eq!(document.status(), Some(EntryStatus::Approved));
        assert_eq!(
            document.get_string(field::UUID).as_deref(),
            Some(album.uuid.as_str())
        );
    }

    #[test]
    fn test_get_long_ignores_text_fields() {
        let mut document = Document::new();
        document.add_text("year", "1969");
        assert_eq!(document.get_long("year"), None);

        document.add_keyword("year", 1969);
        assert_eq!(document.get_long("year"), Some(1969));
    }

    #[test]
    fn test_summary_truncates_long_content() {
        let mut document = Document::new();
        document.add_text(field::TITLE, "Abbey Road");
        document.add_text(field::CONTENT, "a".repeat(250));

        let summary = Summary::from_document(&document, 200);

        assert_eq!(summary.title, "Abbey Road");
        assert_eq!(summary.content.chars().count(), 200);
        assert!(summary.content.ends_with("..."));
    }

    #[test]
    fn test_summary_never_exceeds_tiny_limits() {
        let mut document = Document::new();
        document.add_text(field::CONTENT, "Homogenic");

        for max_length in 0..=4 {
            let summary = Summary::from_document(&document, max_length);
            assert!(summary.content.chars().count() <= max_length);
        }

        assert_eq!(Summary::from_document(&document, 0).content, "");
        assert_eq!(Summary::from_document(&document, 2).content, "Ho");
        assert_eq!(Summary::from_document(&document, 3).content, "...");
        assert_eq!(Summary::from_document(&document, 4).content, "H...");
    }

    #[test]
    fn test_summary_keeps_short_content() {
        let mut document = Document::new();
        document.add_text(field::CONTENT, "Jóga");

        let summary = Summary::from_document(&document, 200);

        assert_eq!(summary.title, "");
        assert_eq!(summary.content, "Jóga");
    }
}
