//! Track references as stored in playlists.xml

use crate::error::ReorderError;
use std::fmt;

const FILE_SCHEME: &str = "file://";

/// A single track reference, kept exactly as Rhythmbox stores it
/// (URL-escaped, usually with a file:// prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

/// Folder/file split of a decoded location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationKey {
    /// Containing folder, including the trailing separator
    pub group: String,

    /// File name after the last separator
    pub leaf: String,
}

impl Location {
    /// Wrap a raw (still URL-escaped) location string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw location as stored in the playlist
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-decoded path with the file:// prefix removed
    pub fn decoded_path(&self) -> Result<String, ReorderError> {
        let decoded = percent_decode(&self.0)?;
        match decoded.strip_prefix(FILE_SCHEME) {
            Some(path) => Ok(path.to_string()),
            None => Ok(decoded),
        }
    }

    /// Split the decoded path into its folder and file name
    ///
    /// A path without any `/` has an empty folder.
    pub fn key(&self) -> Result<LocationKey, ReorderError> {
        let path = self.decoded_path()?;
        let (group, leaf) = match path.rfind('/') {
            Some(idx) => path.split_at(idx + 1),
            None => ("", path.as_str()),
        };
        Ok(LocationKey {
            group: group.to_string(),
            leaf: leaf.to_string(),
        })
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strict percent-decoding: every `%` must start a two digit hex escape
/// and the decoded bytes must be valid UTF-8
fn percent_decode(raw: &str) -> Result<String, ReorderError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            let valid = escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(ReorderError::Decode {
                    location: raw.to_string(),
                    reason: format!("invalid percent escape at byte {}", i),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    // `+` stays a literal `+`; Rhythmbox writes spaces as %20
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ReorderError::Decode {
            location: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_separators_decode_to_folder() {
        let location = Location::new("file://%2Fmusic%2FArtist%2Fsong.mp3");
        let key = location.key().unwrap();

        assert_eq!(key.group, "/music/Artist/");
        assert_eq!(key.leaf, "song.mp3");
    }

    #[test]
    fn test_plain_file_uri() {
        let location = Location::new("file:///home/user/Music/Some%20Album/01%20Intro.flac");

        assert_eq!(
            location.decoded_path().unwrap(),
            "/home/user/Music/Some Album/01 Intro.flac"
        );
        let key = location.key().unwrap();
        assert_eq!(key.group, "/home/user/Music/Some Album/");
        assert_eq!(key.leaf, "01 Intro.flac");
    }

    #[test]
    fn test_scheme_is_stripped_after_decoding() {
        let location = Location::new("file%3A%2F%2F%2Fa%2Fb.ogg");
        assert_eq!(location.decoded_path().unwrap(), "/a/b.ogg");
    }

    #[test]
    fn test_location_without_scheme() {
        let location = Location::new("/music/x.mp3");
        assert_eq!(location.decoded_path().unwrap(), "/music/x.mp3");
    }

    #[test]
    fn test_short_location_without_scheme() {
        let location = Location::new("a.mp3");
        let key = location.key().unwrap();
        assert_eq!(key.group, "");
        assert_eq!(key.leaf, "a.mp3");
    }

    #[test]
    fn test_plus_is_not_a_space() {
        let location = Location::new("file:///music/C+C/track.mp3");
        assert_eq!(location.key().unwrap().group, "/music/C+C/");
    }

    #[test]
    fn test_trailing_separator_has_empty_leaf() {
        let key = Location::new("file:///music/dir/").key().unwrap();
        assert_eq!(key.group, "/music/dir/");
        assert_eq!(key.leaf, "");
    }

    #[test]
    fn test_malformed_escape_is_an_error() {
        for raw in ["file:///music/100%/a.mp3", "file:///a%zzb.mp3", "file:///a.mp3%4"] {
            let err = Location::new(raw).key().unwrap_err();
            assert!(matches!(err, ReorderError::Decode { .. }), "{raw}");
        }
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = Location::new("file:///music/%FF.mp3").decoded_path().unwrap_err();
        assert!(matches!(err, ReorderError::Decode { .. }));
    }
}
