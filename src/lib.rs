//! Rhythmbox Shuffler - folder-aware playlist reordering
//!
//! This library groups the tracks of Rhythmbox playlists by containing
//! folder, then shuffles or sorts the folders and the tracks within them.

pub mod error;
pub mod model;
pub mod reorder;
pub mod rhythmbox;
pub mod shuffle;

pub use error::ReorderError;
pub use reorder::{reorder, ReorderOptions};
pub use shuffle::{ShuffleConfig, ShufflePipeline};
