use serde::{Deserialize, Serialize};

use dualys_plan::Plan;
use dualys_types::{ContentId, PlanId, VfsPath};

use crate::error::ExecResult;

// ---------------------------------------------------------------------------
// ExecutionOutcome
// ---------------------------------------------------------------------------

/// What a strategy did with a plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The entry point was found and handed to the runtime.
    Completed {
        plan: PlanId,
        entry_point: VfsPath,
        content: ContentId,
    },
    /// The plan's state has no file at the entry point; nothing ran.
    EntryPointMissing { plan: PlanId, entry_point: VfsPath },
    /// The plan was materialized and inspected only.
    Inspected { plan: PlanId, entries: usize },
}

impl ExecutionOutcome {
    /// The plan this outcome is about.
    pub fn plan(&self) -> &PlanId {
        match self {
            Self::Completed { plan, .. }
            | Self::EntryPointMissing { plan, .. }
            | Self::Inspected { plan, .. } => plan,
        }
    }

    /// Returns `true` unless the plan could not be executed.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::EntryPointMissing { .. })
    }
}

// ---------------------------------------------------------------------------
// ExecutionStrategy trait
// ---------------------------------------------------------------------------

/// A way of executing a plan.
///
/// Implementations obtain the plan's state through
/// [`Plan::materialize`] and never modify the plan. A plan that cannot be
/// run for lack of content is reported through the returned
/// [`ExecutionOutcome`]; `Err` is reserved for failures of the strategy
/// itself.
///
/// The trait is object-safe and `Send + Sync` so the engine can hold a
/// `Box<dyn ExecutionStrategy>`.
pub trait ExecutionStrategy: Send + Sync {
    /// Human-readable name of this strategy (e.g., "wasm", "dry-run").
    fn name(&self) -> &str;

    /// Execute the plan and report what happened.
    fn execute(&self, plan: &Plan) -> ExecResult<ExecutionOutcome>;
}
