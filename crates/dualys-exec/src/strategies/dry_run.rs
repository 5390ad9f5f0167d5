use tracing::{debug, info};

use dualys_plan::Plan;

use crate::error::ExecResult;
use crate::strategy::{ExecutionOutcome, ExecutionStrategy};

/// Materializes the plan and logs its state without running anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunStrategy;

impl ExecutionStrategy for DryRunStrategy {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn execute(&self, plan: &Plan) -> ExecResult<ExecutionOutcome> {
        let state = plan.materialize();
        for (path, content) in &state {
            debug!(plan = %plan.id(), path = %path, content = %content, "dry-run entry");
        }
        info!(plan = %plan.id(), entries = state.len(), "dry-run complete");
        Ok(ExecutionOutcome::Inspected {
            plan: plan.id().clone(),
            entries: state.len(),
        })
    }
}
