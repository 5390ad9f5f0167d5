//! State-level diff: compare two materialized plan states.
//!
//! The diff detects path additions, removals, and content changes. Content
//! identifiers are compared as opaque strings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use dualys_plan::{FileSystemState, Plan};
use dualys_types::{ContentId, VfsPath};

/// The result of comparing two states.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDiff {
    /// The list of changes, ordered by path.
    pub changes: Vec<StateChange>,
}

impl StateDiff {
    /// Create an empty state diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of added paths.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, StateChange::Added { .. }))
            .count()
    }

    /// Number of removed paths.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, StateChange::Removed { .. }))
            .count()
    }

    /// Number of paths whose content changed.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, StateChange::Modified { .. }))
            .count()
    }
}

/// A single difference between two states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StateChange {
    /// The path exists only in the new state.
    Added { path: VfsPath, content: ContentId },
    /// The path exists only in the old state.
    Removed { path: VfsPath, content: ContentId },
    /// The path exists in both states with different content.
    Modified {
        path: VfsPath,
        old: ContentId,
        new: ContentId,
    },
}

impl StateChange {
    /// The path this change concerns.
    pub fn path(&self) -> &VfsPath {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

/// Compute the diff between two states.
///
/// Both states are ordered by path, so a single merged walk yields the
/// changes already sorted. Paths present only in `new` are `Added`, paths
/// present only in `old` are `Removed`, and paths present in both with
/// different content are `Modified`.
pub fn diff_states(old: &FileSystemState, new: &FileSystemState) -> StateDiff {
    let mut changes = Vec::new();
    let mut old_entries = old.iter();
    let mut new_entries = new.iter();
    let mut left = old_entries.next();
    let mut right = new_entries.next();

    loop {
        match (left, right) {
            (None, None) => break,
            (Some((path, content)), None) => {
                changes.push(removed(path, content));
                left = old_entries.next();
            }
            (None, Some((path, content))) => {
                changes.push(added(path, content));
                right = new_entries.next();
            }
            (Some((old_path, old_content)), Some((new_path, new_content))) => {
                match old_path.cmp(new_path) {
                    Ordering::Less => {
                        changes.push(removed(old_path, old_content));
                        left = old_entries.next();
                    }
                    Ordering::Greater => {
                        changes.push(added(new_path, new_content));
                        right = new_entries.next();
                    }
                    Ordering::Equal => {
                        if old_content != new_content {
                            changes.push(StateChange::Modified {
                                path: old_path.clone(),
                                old: old_content.clone(),
                                new: new_content.clone(),
                            });
                        }
                        left = old_entries.next();
                        right = new_entries.next();
                    }
                }
            }
        }
    }

    StateDiff { changes }
}

fn added(path: &VfsPath, content: &ContentId) -> StateChange {
    StateChange::Added {
        path: path.clone(),
        content: content.clone(),
    }
}

fn removed(path: &VfsPath, content: &ContentId) -> StateChange {
    StateChange::Removed {
        path: path.clone(),
        content: content.clone(),
    }
}

/// Materialize both plans and compare their states.
pub fn diff_plans(old: &Plan, new: &Plan) -> StateDiff {
    diff_states(&old.materialize(), &new.materialize())
}
