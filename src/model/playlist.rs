use super::Location;
use quick_xml::events::Event;

/// Root element name of playlists.xml
pub const DEFAULT_ROOT: &str = "rhythmdb-playlists";

/// Playlist type, from the `type` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistKind {
    /// Explicit list of locations
    Static,

    /// Query-based ("smart") playlist
    Automatic,

    /// The play queue
    Queue,

    Other(String),
}

impl PlaylistKind {
    /// Parse a `type` attribute; only an explicit `static` is static
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            None => PlaylistKind::Other(String::new()),
            Some("static") => PlaylistKind::Static,
            Some("automatic") => PlaylistKind::Automatic,
            Some("queue") => PlaylistKind::Queue,
            Some(other) => PlaylistKind::Other(other.to_string()),
        }
    }
}

/// One `<playlist>` record
///
/// Attributes keep their source order, and any child content other than
/// `<location>` (such as the `<conjunction>` query of an automatic
/// playlist) is kept as XML events so the playlist is written back unchanged.
#[derive(Debug, Clone)]
pub struct Playlist {
    attributes: Vec<(String, String)>,
    locations: Vec<Location>,
    query: Vec<Event<'static>>,
}

impl Playlist {
    /// Create a new empty static playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: vec![
                ("name".to_string(), name.into()),
                ("type".to_string(), "static".to_string()),
            ],
            locations: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Create a playlist from attributes as read from XML
    pub fn from_attributes(attributes: Vec<(String, String)>) -> Self {
        Self {
            attributes,
            locations: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.attribute("name").unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_attribute("name", name);
    }

    pub fn kind(&self) -> PlaylistKind {
        PlaylistKind::from_attribute(self.attribute("type"))
    }

    pub fn is_static(&self) -> bool {
        self.kind() == PlaylistKind::Static
    }

    /// Look up a raw attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace an attribute in place, or append it if missing
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn show_browser(&self) -> Option<bool> {
        self.attribute("show-browser").and_then(|v| v.parse().ok())
    }

    pub fn browser_position(&self) -> Option<i32> {
        self.attribute("browser-position").and_then(|v| v.parse().ok())
    }

    pub fn search_type(&self) -> Option<&str> {
        self.attribute("search-type")
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.attribute("sort-key")
    }

    pub fn sort_direction(&self) -> Option<i32> {
        self.attribute("sort-direction").and_then(|v| v.parse().ok())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }

    /// Replace the track list, e.g. with a reordered one
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    /// Non-location child content, as XML events
    pub fn query(&self) -> &[Event<'static>] {
        &self.query
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub(crate) fn push_query_event(&mut self, event: Event<'static>) {
        self.query.push(event);
    }

    /// Number of tracks in this playlist
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// A whole playlists.xml document
#[derive(Debug, Clone)]
pub struct PlaylistDocument {
    root: String,
    root_attributes: Vec<(String, String)>,
    playlists: Vec<Playlist>,
}

impl PlaylistDocument {
    /// Create an empty document with the standard root element
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT, Vec::new())
    }

    pub fn with_root(root: impl Into<String>, root_attributes: Vec<(String, String)>) -> Self {
        Self {
            root: root.into(),
            root_attributes,
            playlists: Vec::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_attributes(&self) -> &[(String, String)] {
        &self.root_attributes
    }

    pub fn add_playlist(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlists_mut(&mut self) -> &mut [Playlist] {
        &mut self.playlists
    }

    /// First static playlist in document order
    pub fn first_static(&self) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.is_static())
    }

    pub fn static_playlists_mut(&mut self) -> impl Iterator<Item = &mut Playlist> {
        self.playlists.iter_mut().filter(|p| p.is_static())
    }

    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }
}

impl Default for PlaylistDocument {
    fn default() -> Self {
        Self::new()
    }
}
