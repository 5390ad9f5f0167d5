//! Layered plan model for Dualys.
//!
//! A [`Plan`] is an identifier, an optional shared immutable base plan, and
//! an append-only stack of [`Layer`](dualys_types::Layer)s. Branching is
//! structural: [`clone_plan`] creates a new empty plan whose base is a
//! [`PlanHandle`] to the source, so no state is ever copied. The final
//! path-to-content mapping of a plan is computed on demand by walking its
//! ancestry and overlaying layers in order (see [`materialize`]).
//!
//! # Invariants
//!
//! - A plan's base never changes after construction.
//! - Layers are only ever appended, never removed or reordered.
//! - A plan reachable through a [`PlanHandle`] held elsewhere is read-only.
//! - Materialization is a pure function of the ancestry and layer order.

pub mod error;
pub mod materialize;
pub mod plan;
pub mod state;

pub use error::{PlanError, PlanResult};
pub use plan::{apply_to_handle, clone_plan, Plan, PlanHandle};
pub use state::FileSystemState;
