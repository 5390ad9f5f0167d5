//! Error types for registry operations.

use thiserror::Error;

use dualys_plan::PlanError;
use dualys_merge::MergeError;
use dualys_types::PlanId;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No plan is registered under this id.
    #[error("plan not found: {id}")]
    NotFound { id: PlanId },

    /// A plan is already registered under this id.
    #[error("plan already exists: {id}")]
    AlreadyExists { id: PlanId },

    /// The plan could not be mutated (it is shared).
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// The merge was rejected.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
