//! Rhythmbox playlists (playlists.xml) writer

use crate::model::{Playlist, PlaylistDocument};
use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serialize a document as indented XML with an XML declaration
pub fn write_playlists<W: Write>(document: &PlaylistDocument, out: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let root = start_element(document.root(), document.root_attributes());
    writer.write_event(Event::Start(root))?;
    for playlist in document.playlists() {
        write_playlist(&mut writer, playlist)?;
    }
    writer.write_event(Event::End(BytesEnd::new(document.root())))?;

    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Render a document fully in memory
pub fn render_playlists(document: &PlaylistDocument) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_playlists(document, &mut out)?;
    Ok(out)
}

/// Write a document to disk
///
/// The document is rendered before the file is created, so a rendering
/// failure leaves no file behind.
pub fn save_playlists(document: &PlaylistDocument, path: &Path) -> Result<()> {
    let bytes = render_playlists(document)?;
    fs::write(path, bytes).with_context(|| format!("Failed to write playlists: {:?}", path))?;
    log::info!(
        "Wrote {} playlists to {:?}",
        document.playlist_count(),
        path
    );
    Ok(())
}

/// Write one `<playlist>`: all `<location>` children first, then the query
/// content. Rhythmbox never mixes the two, so child order is preserved in
/// practice.
fn write_playlist<W: Write>(writer: &mut Writer<W>, playlist: &Playlist) -> Result<()> {
    let start = start_element("playlist", playlist.attributes());

    if playlist.is_empty() && !playlist.has_query() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for location in playlist.locations() {
        writer.write_event(Event::Start(BytesStart::new("location")))?;
        writer.write_event(Event::Text(BytesText::new(location.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("location")))?;
    }
    for event in playlist.query() {
        writer.write_event(event.borrow())?;
    }
    writer.write_event(Event::End(BytesEnd::new("playlist")))?;
    Ok(())
}

fn start_element<'a>(name: &'a str, attributes: &'a [(String, String)]) -> BytesStart<'a> {
    BytesStart::new(name).with_attributes(
        attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    )
}
