//! The [`PlanRegistry`] itself.
//!
//! Plans are stored in a `BTreeMap` behind a `RwLock`, so listing is ordered
//! by id and a registry can be shared by reference across threads.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use dualys_merge::Merger;
use dualys_plan::{apply_to_handle, clone_plan, Plan, PlanHandle};
use dualys_types::{Layer, PlanId};

use crate::error::{RegistryError, Result};

/// Identifier-to-plan map with an optional initial-state template.
#[derive(Debug, Default)]
pub struct PlanRegistry {
    plans: RwLock<BTreeMap<PlanId, PlanHandle>>,
    template: Option<PlanHandle>,
}

impl PlanRegistry {
    /// Create an empty registry without a template: new plans are roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose new plans are clones of `template`.
    pub fn with_template(template: PlanHandle) -> Self {
        Self {
            plans: RwLock::new(BTreeMap::new()),
            template: Some(template),
        }
    }

    /// The initial-state template, if any.
    pub fn template(&self) -> Option<&PlanHandle> {
        self.template.as_ref()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<PlanId, PlanHandle>>> {
        self.plans
            .read()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<PlanId, PlanHandle>>> {
        self.plans
            .write()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    /// Create and register a new plan.
    ///
    /// With a template the plan is a clone of it, otherwise an empty root.
    pub fn create(&self, id: impl Into<PlanId>) -> Result<PlanHandle> {
        let id = id.into();
        let plan = match &self.template {
            Some(template) => clone_plan(template, id),
            None => Plan::root(id),
        };
        self.insert(plan)
    }

    /// Register a plan built elsewhere.
    pub fn insert(&self, plan: Plan) -> Result<PlanHandle> {
        let mut plans = self.write()?;
        if plans.contains_key(plan.id()) {
            return Err(RegistryError::AlreadyExists {
                id: plan.id().clone(),
            });
        }
        let id = plan.id().clone();
        let handle = plan.into_handle();
        plans.insert(id.clone(), Arc::clone(&handle));
        debug!(plan = %id, count = plans.len(), "registered plan");
        Ok(handle)
    }

    /// Look up a plan.
    pub fn get(&self, id: &PlanId) -> Result<Option<PlanHandle>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Look up a plan, failing if it is not registered.
    pub fn require(&self, id: &PlanId) -> Result<PlanHandle> {
        self.get(id)?
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })
    }

    /// Returns `true` if a plan is registered under `id`.
    pub fn contains(&self, id: &PlanId) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    /// Clone the registered plan `source` into a new registered plan.
    pub fn branch(&self, source: &PlanId, new_id: impl Into<PlanId>) -> Result<PlanHandle> {
        let base = self.require(source)?;
        self.insert(clone_plan(&base, new_id))
    }

    /// Append a layer to a registered plan.
    ///
    /// Fails with [`RegistryError::Plan`] if the plan is shared: it is the
    /// base of another plan, or a handle returned by this registry is still
    /// held by the caller.
    pub fn apply_layer(&self, id: &PlanId, layer: Layer) -> Result<()> {
        let mut plans = self.write()?;
        let handle = plans
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;
        apply_to_handle(handle, layer)?;
        Ok(())
    }

    /// Merge two registered plans and register the result as `new_id`.
    pub fn merge(
        &self,
        new_id: impl Into<PlanId>,
        a: &PlanId,
        b: &PlanId,
        merger: &Merger,
    ) -> Result<PlanHandle> {
        let new_id = new_id.into();
        if self.contains(&new_id)? {
            return Err(RegistryError::AlreadyExists { id: new_id });
        }
        let left = self.require(a)?;
        let right = self.require(b)?;
        let merged = merger.merge(new_id, &left, &right)?;
        self.insert(merged)
    }

    /// Unregister a plan. Returns `true` if it was registered.
    ///
    /// Plans that use it as a base keep it alive through their own handles.
    pub fn remove(&self, id: &PlanId) -> Result<bool> {
        let removed = self.write()?.remove(id).is_some();
        if removed {
            debug!(plan = %id, "unregistered plan");
        }
        Ok(removed)
    }

    /// All registered ids, in order.
    pub fn ids(&self) -> Result<Vec<PlanId>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Number of registered plans.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no plan is registered.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }
}
