//! Shuffle run configuration

use super::display::DisplayLevel;
use crate::reorder::ReorderOptions;

/// Configuration for one shuffle run
#[derive(Debug, Clone)]
pub struct ShuffleConfig {
    /// Folder and track ordering policy
    pub options: ReorderOptions,

    /// Whether to add a reordered copy or reorder in place
    pub mode: ShuffleMode,

    /// How much to print about visited playlists
    pub display: DisplayLevel,
}

/// Which playlists get reordered, and how the result is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Append a renamed, reordered copy of the first static playlist
    #[default]
    Copy,

    /// Reorder every static playlist in place
    InPlace,
}

impl ShuffleConfig {
    /// Create a new configuration in copy mode with display off
    pub fn new(options: ReorderOptions) -> Self {
        Self {
            options,
            mode: ShuffleMode::Copy,
            display: DisplayLevel::Off,
        }
    }

    pub fn with_mode(mut self, mode: ShuffleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_display(mut self, display: DisplayLevel) -> Self {
        self.display = display;
        self
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self::new(ReorderOptions::default())
    }
}
