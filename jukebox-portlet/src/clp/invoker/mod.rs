//! Dispatch tables over the catalog services
//!
//! One invoker per service. Each registers the service's operations under
//! their wire names at construction and exposes a single
//! [`invoke_method`](AlbumLocalServiceClpInvoker::invoke_method) entry point.

mod album_local;
mod album_remote;
mod artist_local;
mod song_local;

pub use album_local::AlbumLocalServiceClpInvoker;
pub use album_remote::AlbumServiceClpInvoker;
pub use artist_local::ArtistLocalServiceClpInvoker;
pub use song_local::SongLocalServiceClpInvoker;
