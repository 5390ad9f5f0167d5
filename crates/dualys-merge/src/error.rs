//! Error types for the merge engine.

use dualys_types::PlanId;

/// Errors that can occur while merging plans.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The two plans do not sit on the same base, so their layer stacks
    /// cannot be concatenated. `None` stands for a root plan (no base).
    #[error("incompatible bases: {} vs {}", display_base(.left), display_base(.right))]
    IncompatibleBases {
        /// Base of the first plan.
        left: Option<PlanId>,
        /// Base of the second plan.
        right: Option<PlanId>,
    },
}

fn display_base(base: &Option<PlanId>) -> String {
    match base {
        Some(id) => id.to_string(),
        None => "<root>".to_string(),
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
