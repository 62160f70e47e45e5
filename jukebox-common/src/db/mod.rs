//! Catalog models and their SQLite queries

pub mod albums;
pub mod artists;
pub mod init;
pub mod models;
pub mod songs;

pub use init::*;
pub use models::*;
