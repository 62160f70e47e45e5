//! Jukebox catalog portlet
//!
//! Album, artist and song services over SQLite, the name/signature
//! dispatch tables that expose them to loosely-typed callers, and the
//! search indexers for albums and songs.

pub mod clp;
pub mod search;
pub mod service;
