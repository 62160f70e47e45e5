//! # Jukebox Common Library
//!
//! Shared code for the jukebox portlet crates including:
//! - Catalog models (Artist, Album, Song) and their SQLite storage
//! - Configuration loading and root folder resolution
//! - Common error type
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use db::models::{Album, Artist, EntryStatus, Song};
pub use error::{Error, Result};
