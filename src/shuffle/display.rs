//! Human readable dump of playlists

use crate::model::Playlist;
use anyhow::Result;
use std::io::Write;

/// How much to print about each static playlist visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLevel {
    #[default]
    Off,

    /// Track count and playlist attributes
    Summary,

    /// Summary plus every decoded track path
    Full,
}

impl DisplayLevel {
    /// Map the `--display`/`--display-all` flags; `display_all` implies `display`
    pub fn from_flags(display: bool, display_all: bool) -> Self {
        if display_all {
            DisplayLevel::Full
        } else if display {
            DisplayLevel::Summary
        } else {
            DisplayLevel::Off
        }
    }
}

/// Print one playlist at the given level
pub fn display_playlist<W: Write>(playlist: &Playlist, level: DisplayLevel, out: &mut W) -> Result<()> {
    if level == DisplayLevel::Off {
        return Ok(());
    }

    writeln!(out, "===")?;
    writeln!(out, "Locations: {}", playlist.len())?;
    if level == DisplayLevel::Full {
        for location in playlist.locations() {
            writeln!(out, "   {}", location.decoded_path()?)?;
        }
    }
    writeln!(out, "Name: {}", playlist.name())?;
    writeln!(out, "ShowBrowser: {}", optional(playlist.show_browser()))?;
    writeln!(out, "BrowserPos: {}", optional(playlist.browser_position()))?;
    writeln!(out, "SearchType: {}", playlist.search_type().unwrap_or_default())?;
    writeln!(out, "Type: {}", playlist.attribute("type").unwrap_or_default())?;
    writeln!(out, "SortKey: {}", playlist.sort_key().unwrap_or_default())?;
    writeln!(out, "SortDirection: {}", optional(playlist.sort_direction()))?;
    if playlist.has_query() {
        writeln!(out, "Query: {} events", playlist.query().len())?;
    }
    Ok(())
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
