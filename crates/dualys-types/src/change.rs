//! Path-level change records.
//!
//! A [`FileChange`] pairs a [`VfsPath`] with a [`ChangeKind`]. Additions and
//! modifications always carry the new [`ContentId`]; removals and
//! permission changes carry none, so a record that asks to write content
//! without naming it cannot be built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::ContentId;
use crate::path::VfsPath;

/// What happened to a path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    /// The path was created with the given content.
    Added { content: ContentId },
    /// The path's content was replaced.
    Modified { content: ContentId },
    /// The path was deleted.
    Removed,
    /// The path's permissions changed. Plans track content only, so this is
    /// recorded but has no effect on a materialized state.
    PermissionChanged,
}

impl ChangeKind {
    /// The content written by this change, if any.
    pub fn content(&self) -> Option<&ContentId> {
        match self {
            Self::Added { content } | Self::Modified { content } => Some(content),
            Self::Removed | Self::PermissionChanged => None,
        }
    }

    /// Short lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Modified { .. } => "modified",
            Self::Removed => "removed",
            Self::PermissionChanged => "permission_changed",
        }
    }
}

/// A single path-level delta.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileChange {
    pub path: VfsPath,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: VfsPath, kind: ChangeKind) -> Self {
        Self { path, kind }
    }

    /// `path` was created with `content`.
    pub fn added(path: VfsPath, content: impl Into<ContentId>) -> Self {
        Self::new(
            path,
            ChangeKind::Added {
                content: content.into(),
            },
        )
    }

    /// `path` now holds `content`.
    pub fn modified(path: VfsPath, content: impl Into<ContentId>) -> Self {
        Self::new(
            path,
            ChangeKind::Modified {
                content: content.into(),
            },
        )
    }

    /// `path` was deleted.
    pub fn removed(path: VfsPath) -> Self {
        Self::new(path, ChangeKind::Removed)
    }

    /// `path` had its permissions changed.
    pub fn permission_changed(path: VfsPath) -> Self {
        Self::new(path, ChangeKind::PermissionChanged)
    }

    /// The content written by this change, if any.
    pub fn content(&self) -> Option<&ContentId> {
        self.kind.content()
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.content() {
            Some(content) => write!(f, "{} {} ({})", self.kind.label(), self.path, content),
            None => write!(f, "{} {}", self.kind.label(), self.path),
        }
    }
}
