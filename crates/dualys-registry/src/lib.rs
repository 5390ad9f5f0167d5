//! Plan registry for Dualys.
//!
//! A [`PlanRegistry`] maps plan identifiers to shared [`PlanHandle`]s. It is
//! an ordinary value: whoever creates it owns it and passes it by reference
//! to the code that needs it. There is no process-wide instance.
//!
//! # Ownership
//!
//! - The registry holds one handle per registered plan.
//! - Branching a registered plan makes it the base of the new plan. From
//!   then on the source is shared and [`PlanRegistry::apply_layer`] rejects
//!   further layers for it, since a base must never change under its
//!   children.
//! - An optional template plan seeds every plan created with
//!   [`PlanRegistry::create`].
//!
//! [`PlanHandle`]: dualys_plan::PlanHandle

pub mod error;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::PlanRegistry;
