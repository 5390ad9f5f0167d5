//! Named, ordered batches of change records.
//!
//! Record order inside a layer matters: when two records touch the same
//! path, the later one wins. Once a layer is attached to a plan it is only
//! reachable by shared reference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::change::FileChange;
use crate::content::ContentId;
use crate::id::LayerId;
use crate::path::VfsPath;

/// An ordered, named sequence of [`FileChange`] records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    changes: Vec<FileChange>,
}

impl Layer {
    /// Create an empty layer.
    pub fn new(id: impl Into<LayerId>) -> Self {
        Self {
            id: id.into(),
            changes: Vec::new(),
        }
    }

    /// Create a layer from an existing list of changes.
    pub fn with_changes(id: impl Into<LayerId>, changes: Vec<FileChange>) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }

    pub fn id(&self) -> &LayerId {
        &self.id
    }

    /// The records in application order.
    pub fn changes(&self) -> &[FileChange] {
        &self.changes
    }

    /// Append a record.
    pub fn push(&mut self, change: FileChange) {
        self.changes.push(change);
    }

    /// Builder: append an addition.
    pub fn add(mut self, path: VfsPath, content: impl Into<ContentId>) -> Self {
        self.push(FileChange::added(path, content));
        self
    }

    /// Builder: append a modification.
    pub fn modify(mut self, path: VfsPath, content: impl Into<ContentId>) -> Self {
        self.push(FileChange::modified(path, content));
        self
    }

    /// Builder: append a removal.
    pub fn remove(mut self, path: VfsPath) -> Self {
        self.push(FileChange::removed(path));
        self
    }

    /// Builder: append a permission change.
    pub fn chmod(mut self, path: VfsPath) -> Self {
        self.push(FileChange::permission_changed(path));
        self
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileChange> {
        self.changes.iter()
    }

    /// Distinct paths touched by this layer, in order of first appearance.
    pub fn touched_paths(&self) -> Vec<&VfsPath> {
        let mut seen = HashSet::new();
        self.changes
            .iter()
            .map(|c| &c.path)
            .filter(|p| seen.insert(*p))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a FileChange;
    type IntoIter = std::slice::Iter<'a, FileChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> VfsPath {
        VfsPath::new(s).unwrap()
    }

    #[test]
    fn new_layer_is_empty() {
        let layer = Layer::new("empty");
        assert!(layer.is_empty());
        assert_eq!(layer.id().as_str(), "empty");
    }

    #[test]
    fn builder_preserves_order() {
        let layer = Layer::new("nginx_config")
            .add(path("/etc/nginx.conf"), "h1")
            .modify(path("/etc/nginx.conf"), "h2")
            .remove(path("/tmp/x"))
            .chmod(path("/etc/nginx.conf"));

        assert_eq!(layer.len(), 4);
        let labels: Vec<_> = layer.iter().map(|c| c.kind.label()).collect();
        assert_eq!(labels, ["added", "modified", "removed", "permission_changed"]);
    }

    #[test]
    fn touched_paths_are_distinct_in_first_seen_order() {
        let layer = Layer::new("l")
            .add(path("/b"), "1")
            .add(path("/a"), "2")
            .modify(path("/b"), "3");

        let touched: Vec<_> = layer.touched_paths().iter().map(|p| p.as_str()).collect();
        assert_eq!(touched, ["/b", "/a"]);
    }

    #[test]
    fn with_changes_keeps_records() {
        let changes = vec![
            FileChange::added(path("/x"), "h"),
            FileChange::removed(path("/x")),
        ];
        let layer = Layer::with_changes("l", changes.clone());
        assert_eq!(layer.changes(), changes.as_slice());
    }
}
