//! Error types for plan operations.

use dualys_types::PlanId;

/// Errors that can occur during plan operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The plan is referenced by other handles (for example as another
    /// plan's base) and can no longer be mutated.
    #[error("plan {plan} is shared by {holders} handles and is read-only")]
    Shared {
        /// The plan that was targeted.
        plan: PlanId,
        /// Number of strong handles at the time of the attempt.
        holders: usize,
    },
}

/// Convenience alias for plan results.
pub type PlanResult<T> = Result<T, PlanError>;
