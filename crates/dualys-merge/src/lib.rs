//! Merge engine for Dualys plans.
//!
//! Combines two sibling plans (plans cloned from the same base) into a new
//! plan on that base whose layers are the first plan's layers followed by
//! the second plan's. Conflicts resolve by application order: for any path
//! touched by both sides, the second plan's write wins once the result is
//! materialized. No three-way merge and no conflict report are produced.
//!
//! How "same base" is decided is configurable through [`BaseComparison`];
//! the default compares base handles by identity.

pub mod config;
pub mod error;
pub mod merger;

pub use config::{BaseComparison, MergeConfig};
pub use error::{MergeError, MergeResult};
pub use merger::{merge, Merger};
