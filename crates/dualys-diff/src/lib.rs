//! State comparison for Dualys plans.
//!
//! Compares two materialized [`FileSystemState`](dualys_plan::FileSystemState)s
//! and reports which paths were added, removed, or point at different
//! content. Useful for showing what a branch or a merge changed relative to
//! its source.
//!
//! # Key Types
//!
//! - [`StateDiff`] / [`StateChange`] -- Path-level differences, ordered by path

pub mod state_diff;

pub use state_diff::{diff_plans, diff_states, StateChange, StateDiff};
