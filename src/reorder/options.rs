//! Ordering policy for a reorder run

/// How folders and the tracks inside them are ordered
///
/// `false` means sort in byte order instead of shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOptions {
    /// Shuffle the order of folders
    pub shuffle_groups: bool,

    /// Shuffle the tracks inside each folder
    pub shuffle_within_group: bool,
}

impl ReorderOptions {
    pub fn new(shuffle_groups: bool, shuffle_within_group: bool) -> Self {
        Self {
            shuffle_groups,
            shuffle_within_group,
        }
    }

    /// Sort folders and tracks alphabetically
    pub fn sorted() -> Self {
        Self::new(false, false)
    }

    /// Shuffle both folders and tracks
    pub fn shuffled() -> Self {
        Self::new(true, true)
    }
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self::shuffled()
    }
}
