//! Rhythmbox playlists (playlists.xml) parser
//!
//! Reads every playlist with its attributes and `<location>` entries.
//! Query trees of automatic playlists are kept as raw events so that the
//! document can be written back without loss.

use crate::model::{Location, Playlist, PlaylistDocument};
use anyhow::{anyhow, bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse playlists.xml from disk
pub fn parse_playlists(path: &Path) -> Result<PlaylistDocument> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open Rhythmbox playlists: {:?}", path))?;

    read_playlists(BufReader::new(file))
        .with_context(|| format!("Failed to parse Rhythmbox playlists: {:?}", path))
}

/// Parse a playlists document from any buffered reader
///
/// Unlike the rest of the tool's input handling this is strict: the
/// document is going to be rewritten, so XML errors abort the run.
pub fn read_playlists<R: BufRead>(source: R) -> Result<PlaylistDocument> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut document: Option<PlaylistDocument> = None;
    let mut current_playlist: Option<Playlist> = None;
    // Text collected for the <location> currently open, if any
    let mut location_text: Option<String> = None;
    // Nesting depth inside non-location playlist children
    let mut query_depth = 0usize;
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("XML error at position {}", reader.buffer_position()))?;

        match event {
            Event::Start(e) => {
                if let Some(ref mut playlist) = current_playlist {
                    if location_text.is_some() {
                        bail!(
                            "Unexpected element <{}> inside <location>",
                            String::from_utf8_lossy(e.name().as_ref())
                        );
                    }
                    if query_depth == 0 && e.name().as_ref() == b"location" {
                        location_text = Some(String::new());
                    } else {
                        query_depth += 1;
                        playlist.push_query_event(Event::Start(e.into_owned()));
                    }
                } else if document.is_none() {
                    let root = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    document = Some(PlaylistDocument::with_root(root, read_attributes(&e)?));
                } else if e.name().as_ref() == b"playlist" {
                    current_playlist = Some(Playlist::from_attributes(read_attributes(&e)?));
                } else {
                    let name = e.name().as_ref().to_vec();
                    log::debug!(
                        "Skipping unknown element <{}>",
                        String::from_utf8_lossy(&name)
                    );
                    reader.read_to_end_into(QName(&name), &mut skip_buf)?;
                    skip_buf.clear();
                }
            }

            Event::Empty(e) => {
                if let Some(ref mut playlist) = current_playlist {
                    if query_depth == 0 && e.name().as_ref() == b"location" {
                        playlist.add_location(Location::new(String::new()));
                    } else {
                        playlist.push_query_event(Event::Empty(e.into_owned()));
                    }
                } else if document.is_none() {
                    let root = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    document = Some(PlaylistDocument::with_root(root, read_attributes(&e)?));
                } else if e.name().as_ref() == b"playlist" {
                    if let Some(ref mut doc) = document {
                        doc.add_playlist(Playlist::from_attributes(read_attributes(&e)?));
                    }
                }
            }

            Event::Text(e) => {
                if let Some(ref mut text) = location_text {
                    text.push_str(&e.unescape()?);
                } else if query_depth > 0 {
                    if let Some(ref mut playlist) = current_playlist {
                        playlist.push_query_event(Event::Text(e.into_owned()));
                    }
                }
            }

            Event::CData(e) => {
                if let Some(ref mut text) = location_text {
                    text.push_str(&String::from_utf8_lossy(&e));
                } else if query_depth > 0 {
                    if let Some(ref mut playlist) = current_playlist {
                        playlist.push_query_event(Event::CData(e.into_owned()));
                    }
                }
            }

            Event::End(e) => {
                if let Some(text) = location_text.take() {
                    if let Some(ref mut playlist) = current_playlist {
                        playlist.add_location(Location::new(text));
                    }
                } else if query_depth > 0 {
                    query_depth -= 1;
                    if let Some(ref mut playlist) = current_playlist {
                        playlist.push_query_event(Event::End(e.into_owned()));
                    }
                } else if let Some(playlist) = current_playlist.take() {
                    log::debug!(
                        "Playlist '{}' ({:?}): {} locations",
                        playlist.name(),
                        playlist.kind(),
                        playlist.len()
                    );
                    if let Some(ref mut doc) = document {
                        doc.add_playlist(playlist);
                    }
                }
            }

            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if current_playlist.is_some() {
        bail!("Unexpected end of file inside <playlist>");
    }

    let document = document.ok_or_else(|| anyhow!("Playlists document has no root element"))?;
    log::info!("Parsed {} playlists from Rhythmbox", document.playlist_count());
    Ok(document)
}

/// Read attributes of an element, in source order and XML-unescaped
fn read_attributes(element: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}
