//! The [`Plan`] node and structural cloning.
//!
//! Plans form a tree through their `base` handles: every plan points at
//! most at one ancestor, and many plans may share the same ancestor. A
//! plan is mutable only while it is uniquely owned. Once it is turned into
//! a [`PlanHandle`] and that handle is shared (typically because another
//! plan was cloned from it), it is frozen for as long as the sharing lasts.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use dualys_types::{Layer, PlanId};

use crate::error::{PlanError, PlanResult};
use crate::materialize::StateCache;

/// Shared, reference-counted, read-only handle to a plan.
pub type PlanHandle = Arc<Plan>;

/// An identified, layered snapshot-in-progress of path state.
pub struct Plan {
    id: PlanId,
    base: Option<PlanHandle>,
    layers: Vec<Layer>,
    pub(crate) cache: StateCache,
}

impl Plan {
    /// Create a plan on top of an optional base. O(1).
    pub fn new(id: impl Into<PlanId>, base: Option<PlanHandle>) -> Self {
        Self {
            id: id.into(),
            base,
            layers: Vec::new(),
            cache: StateCache::default(),
        }
    }

    /// Create a plan with no base: it starts from the empty state.
    pub fn root(id: impl Into<PlanId>) -> Self {
        Self::new(id, None)
    }

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    /// The shared base plan, if any.
    pub fn base(&self) -> Option<&PlanHandle> {
        self.base.as_ref()
    }

    /// Returns `true` if this plan has no base.
    pub fn is_root(&self) -> bool {
        self.base.is_none()
    }

    /// This plan's own layers, in application order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of ancestors above this plan.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.base.as_deref();
        while let Some(plan) = cursor {
            depth += 1;
            cursor = plan.base.as_deref();
        }
        depth
    }

    /// Plan ids from the root of the ancestry down to this plan.
    pub fn ancestry(&self) -> Vec<&PlanId> {
        let mut chain = vec![&self.id];
        let mut cursor = self.base.as_deref();
        while let Some(plan) = cursor {
            chain.push(&plan.id);
            cursor = plan.base.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Append a layer. O(1) amortized.
    ///
    /// Only this plan's own layer sequence changes; its base and every other
    /// plan are untouched.
    pub fn apply_layer(&mut self, layer: Layer) {
        debug!(
            plan = %self.id,
            layer = %layer.id(),
            changes = layer.len(),
            paths = layer.touched_paths().len(),
            "applying layer"
        );
        self.layers.push(layer);
        self.cache.invalidate();
    }

    /// Returns `true` if both plans sit on the very same base handle.
    ///
    /// Bases are compared by identity, not by content. Two root plans count
    /// as sharing the (absent) base.
    pub fn shares_base_with(&self, other: &Plan) -> bool {
        match (&self.base, &other.base) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Freeze this plan into a shareable handle.
    pub fn into_handle(self) -> PlanHandle {
        Arc::new(self)
    }

    /// Clone the plan behind `self` into a new, empty branch. O(1).
    ///
    /// Shorthand for [`clone_plan`].
    pub fn branch(self: &Arc<Self>, new_id: impl Into<PlanId>) -> Plan {
        clone_plan(self, new_id)
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("id", &self.id)
            .field("base", &self.base.as_ref().map(|b| &b.id))
            .field("layers", &self.layers.len())
            .finish()
    }
}

// Unlink uniquely owned ancestors one at a time so dropping the tip of a
// long branch chain does not recurse once per level.
impl Drop for Plan {
    fn drop(&mut self) {
        let mut next = self.base.take();
        while let Some(handle) = next {
            next = match Arc::try_unwrap(handle) {
                Ok(mut plan) => plan.base.take(),
                Err(_) => None,
            };
        }
    }
}

/// Create a new plan whose base is `source` and whose layer stack is empty.
///
/// Nothing is copied: the new plan shares the entire ancestry of `source`
/// through the handle. Because shared plans are read-only, later layers
/// applied to the clone never affect the source and vice versa.
pub fn clone_plan(source: &PlanHandle, new_id: impl Into<PlanId>) -> Plan {
    let plan = Plan::new(new_id, Some(Arc::clone(source)));
    debug!(plan = %plan.id, base = %source.id, "cloned plan");
    plan
}

/// Append a layer to the plan behind `handle`, provided no one else holds it.
///
/// Fails with [`PlanError::Shared`] when the plan is the base of another
/// plan or any other handle to it is alive.
pub fn apply_to_handle(handle: &mut PlanHandle, layer: Layer) -> PlanResult<()> {
    if let Some(plan) = Arc::get_mut(handle) {
        plan.apply_layer(layer);
        return Ok(());
    }
    Err(PlanError::Shared {
        plan: handle.id.clone(),
        holders: Arc::strong_count(handle),
    })
}
