//! Materialized plan state: an ordered map from path to content identifier.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dualys_types::{ChangeKind, ContentId, FileChange, VfsPath};

/// The final path-to-content mapping of a plan.
///
/// Entries are ordered by path. This is the only artifact consumers of a
/// plan ever look at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSystemState {
    entries: BTreeMap<VfsPath, ContentId>,
}

impl FileSystemState {
    /// Create an empty state ("state zero").
    pub fn new() -> Self {
        Self::default()
    }

    /// Content identifier stored at `path`.
    pub fn get(&self, path: &str) -> Option<&ContentId> {
        self.entries.get(path)
    }

    /// Returns `true` if `path` is present.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no path is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> btree_map::Iter<'_, VfsPath, ContentId> {
        self.entries.iter()
    }

    /// All paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &VfsPath> {
        self.entries.keys()
    }

    /// Apply a single change record.
    ///
    /// Additions and modifications insert or overwrite, removals erase the
    /// path if present, permission changes leave the mapping untouched.
    pub fn apply(&mut self, change: &FileChange) {
        match &change.kind {
            ChangeKind::Added { content } | ChangeKind::Modified { content } => {
                self.entries.insert(change.path.clone(), content.clone());
            }
            ChangeKind::Removed => {
                self.entries.remove(&change.path);
            }
            ChangeKind::PermissionChanged => {}
        }
    }
}

impl From<BTreeMap<VfsPath, ContentId>> for FileSystemState {
    fn from(entries: BTreeMap<VfsPath, ContentId>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(VfsPath, ContentId)> for FileSystemState {
    fn from_iter<I: IntoIterator<Item = (VfsPath, ContentId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FileSystemState {
    type Item = (VfsPath, ContentId);
    type IntoIter = btree_map::IntoIter<VfsPath, ContentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileSystemState {
    type Item = (&'a VfsPath, &'a ContentId);
    type IntoIter = btree_map::Iter<'a, VfsPath, ContentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
