//! Playlist data model
//!
//! In-memory form of Rhythmbox's playlists.xml: the document, its
//! playlists, and the track locations they reference.

mod location;
mod playlist;

pub use location::{Location, LocationKey};
pub use playlist::{Playlist, PlaylistDocument, PlaylistKind, DEFAULT_ROOT};
