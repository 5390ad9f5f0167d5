use tracing::{debug, warn};

use dualys_plan::{FileSystemState, Plan, PlanHandle};
use dualys_types::PlanId;

use crate::config::{BaseComparison, MergeConfig};
use crate::error::{MergeError, MergeResult};

/// Merges sibling plans according to a [`MergeConfig`].
#[derive(Clone, Debug, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Returns `true` if `a` and `b` may be merged under this configuration.
    pub fn compatible(&self, a: &Plan, b: &Plan) -> bool {
        match self.config.base_comparison {
            BaseComparison::Identity => a.shares_base_with(b),
            BaseComparison::MaterializedState => {
                a.shares_base_with(b) || base_state(a.base()) == base_state(b.base())
            }
        }
    }

    /// Merge `a` and `b` into a new plan named `new_id`.
    ///
    /// The result sits on `a`'s base and carries all of `a`'s layers
    /// followed by all of `b`'s. The sources are left untouched. When the
    /// bases are incompatible no plan is produced.
    pub fn merge(&self, new_id: impl Into<PlanId>, a: &Plan, b: &Plan) -> MergeResult<Plan> {
        let new_id = new_id.into();

        if !self.compatible(a, b) {
            let err = MergeError::IncompatibleBases {
                left: base_id(a),
                right: base_id(b),
            };
            warn!(merged = %new_id, left = %a.id(), right = %b.id(), error = %err, "merge rejected");
            return Err(err);
        }

        let mut merged = Plan::new(new_id, a.base().cloned());
        for layer in a.layers().iter().chain(b.layers()) {
            merged.apply_layer(layer.clone());
        }

        debug!(
            merged = %merged.id(),
            left = %a.id(),
            right = %b.id(),
            layers = merged.layer_count(),
            "merged plans"
        );
        Ok(merged)
    }
}

/// Merge `a` and `b` with the default configuration (bases compared by
/// identity).
pub fn merge(new_id: impl Into<PlanId>, a: &Plan, b: &Plan) -> MergeResult<Plan> {
    Merger::default().merge(new_id, a, b)
}

fn base_id(plan: &Plan) -> Option<PlanId> {
    plan.base().map(|base| base.id().clone())
}

fn base_state(base: Option<&PlanHandle>) -> FileSystemState {
    base.map(|plan| plan.materialize()).unwrap_or_default()
}
