//! Rhythmbox playlists file handling
//!
//! Parses Rhythmbox's playlists.xml into a [`PlaylistDocument`] and writes
//! it back in the same shape.
//!
//! [`PlaylistDocument`]: crate::model::PlaylistDocument

mod playlists;
mod writer;

pub use playlists::{parse_playlists, read_playlists};
pub use writer::{render_playlists, save_playlists, write_playlists};

/// Where Rhythmbox keeps its playlists, before tilde expansion
pub const DEFAULT_PLAYLISTS_PATH: &str = "~/.local/share/rhythmbox/playlists.xml";
