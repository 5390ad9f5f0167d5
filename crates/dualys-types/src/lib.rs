//! Foundation types for Dualys plans.
//!
//! This crate provides the leaf data model shared by every other Dualys
//! crate: validated virtual paths, opaque content identifiers, path-level
//! change records, and the named layers that batch them.
//!
//! # Key Types
//!
//! - [`VfsPath`] -- Non-empty path inside a plan's virtual file system
//! - [`ContentId`] -- Opaque content identifier (never interpreted)
//! - [`ChangeKind`] / [`FileChange`] -- A single path-level delta
//! - [`PlanId`] / [`LayerId`] -- Caller-chosen identifiers
//! - [`Layer`] -- An ordered, named batch of changes

pub mod change;
pub mod content;
pub mod error;
pub mod id;
pub mod layer;
pub mod path;

pub use change::{ChangeKind, FileChange};
pub use content::ContentId;
pub use error::{TypeError, TypeResult};
pub use id::{LayerId, PlanId};
pub use layer::Layer;
pub use path::VfsPath;
