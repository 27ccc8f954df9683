//! Shuffle orchestration over a whole playlists document

pub mod config;
pub mod display;
pub mod pipeline;

pub use config::{ShuffleConfig, ShuffleMode};
pub use display::{display_playlist, DisplayLevel};
pub use pipeline::{shuffled_name, ShufflePipeline, ShuffleSummary, ShuffledPlaylist};
