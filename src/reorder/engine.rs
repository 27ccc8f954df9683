//! Folder-grouped shuffling and sorting of track locations

use super::options::ReorderOptions;
use crate::error::ReorderError;
use crate::model::Location;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Locations sharing one containing folder
#[derive(Debug, Clone)]
pub struct Group {
    key: String,
    members: Vec<Member>,
}

#[derive(Debug, Clone)]
struct Member {
    leaf: String,
    location: Location,
}

impl Group {
    /// Containing folder of every member
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.members.iter().map(|m| &m.location)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition locations by containing folder
///
/// Groups come out in first-occurrence order of their folder, and members
/// keep their input order.
pub fn group_by_folder(records: &[Location]) -> Result<Vec<Group>, ReorderError> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for location in records {
        let key = location.key()?;
        let member = Member {
            leaf: key.leaf,
            location: location.clone(),
        };
        match index.get(&key.group) {
            Some(&idx) => groups[idx].members.push(member),
            None => {
                index.insert(key.group.clone(), groups.len());
                groups.push(Group {
                    key: key.group,
                    members: vec![member],
                });
            }
        }
    }

    Ok(groups)
}

/// Reorder locations folder by folder
///
/// Folders are shuffled or sorted by path, then the tracks inside each
/// folder are shuffled or sorted by file name, each according to
/// `options`. Sorting is plain byte order ("10" sorts before "2").
/// Tracks from one folder always end up contiguous.
pub fn reorder<R: Rng + ?Sized>(
    records: &[Location],
    options: ReorderOptions,
    rng: &mut R,
) -> Result<Vec<Location>, ReorderError> {
    let mut groups = group_by_folder(records)?;
    log::debug!(
        "Reordering {} locations in {} folders ({:?})",
        records.len(),
        groups.len(),
        options
    );

    if options.shuffle_groups {
        groups.shuffle(rng);
    } else {
        groups.sort_by(|a, b| a.key.cmp(&b.key));
    }

    for group in &mut groups {
        if options.shuffle_within_group {
            group.members.shuffle(rng);
        } else {
            group.members.sort_by(|a, b| a.leaf.cmp(&b.leaf));
        }
    }

    let result: Vec<Location> = groups
        .into_iter()
        .flat_map(|g| g.members.into_iter().map(|m| m.location))
        .collect();

    if result.len() != records.len() {
        return Err(ReorderError::LengthMismatch {
            expected: records.len(),
            actual: result.len(),
        });
    }

    Ok(result)
}
