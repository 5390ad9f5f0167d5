use serde::{Deserialize, Serialize};

/// How the merger decides whether two plans share a base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseComparison {
    /// Bases must be the very same shared handle. Two independently built
    /// plans never match, even if their contents are identical.
    #[default]
    Identity,
    /// Bases match when their materialized states are equal. The merged
    /// plan takes the first plan's base.
    MaterializedState,
}

/// Configuration for the merge engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Base compatibility check applied before merging.
    #[serde(default)]
    pub base_comparison: BaseComparison,
}

impl MergeConfig {
    /// Configuration that accepts content-equal bases.
    pub fn by_materialized_state() -> Self {
        Self {
            base_comparison: BaseComparison::MaterializedState,
        }
    }
}
