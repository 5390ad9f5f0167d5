//! Materialization: turning a plan's ancestry into a [`FileSystemState`].
//!
//! The state of a plan is its base's state with the plan's own layers
//! overlaid in append order, records within a layer in their own order.
//! Ancestry is walked iteratively so long branch chains cannot exhaust the
//! stack.
//!
//! Each plan memoizes its last result keyed by its layer count. A plan held
//! through a shared handle is immutable, so a cached ancestor state stays
//! valid for as long as anyone can observe it; [`Plan::apply_layer`]
//! invalidates the cache of the plan it mutates.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use dualys_types::Layer;

use crate::plan::Plan;
use crate::state::FileSystemState;

#[derive(Debug, Default)]
pub(crate) struct StateCache {
    slot: RwLock<Option<CachedState>>,
}

#[derive(Debug)]
struct CachedState {
    layer_count: usize,
    state: FileSystemState,
}

impl StateCache {
    fn get(&self, layer_count: usize) -> Option<FileSystemState> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|cached| cached.layer_count == layer_count)
            .map(|cached| cached.state.clone())
    }

    fn store(&self, layer_count: usize, state: &FileSystemState) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedState {
            layer_count,
            state: state.clone(),
        });
    }

    pub(crate) fn invalidate(&mut self) {
        *self.slot.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Overlay `layers` onto `state`, in order.
pub fn overlay(state: &mut FileSystemState, layers: &[Layer]) {
    for layer in layers {
        for change in layer {
            state.apply(change);
        }
    }
}

impl Plan {
    /// Compute the final path-to-content mapping of this plan.
    ///
    /// Starts from the nearest ancestor with a valid cached state (or the
    /// empty state at the root) and overlays every plan's layers down to
    /// this one. The result is cached on this plan.
    pub fn materialize(&self) -> FileSystemState {
        if let Some(state) = self.cache.get(self.layer_count()) {
            debug!(plan = %self.id(), entries = state.len(), "materialized plan (cached)");
            return state;
        }

        // Collect the chain leaf-first, stopping at a cached ancestor.
        let mut pending: Vec<&Plan> = vec![self];
        let mut state = FileSystemState::new();
        let mut cursor = self.base().map(|b| b.as_ref());
        while let Some(plan) = cursor {
            if let Some(cached) = plan.cache.get(plan.layer_count()) {
                state = cached;
                break;
            }
            pending.push(plan);
            cursor = plan.base().map(|b| b.as_ref());
        }

        let overlaid = pending.len();
        for plan in pending.into_iter().rev() {
            overlay(&mut state, plan.layers());
        }

        self.cache.store(self.layer_count(), &state);
        debug!(
            plan = %self.id(),
            depth = self.depth(),
            overlaid,
            entries = state.len(),
            "materialized plan"
        );
        state
    }

    /// Compute the state from the root without consulting or filling any
    /// cache.
    pub fn materialize_uncached(&self) -> FileSystemState {
        let mut chain: Vec<&Plan> = vec![self];
        let mut cursor = self.base().map(|b| b.as_ref());
        while let Some(plan) = cursor {
            chain.push(plan);
            cursor = plan.base().map(|b| b.as_ref());
        }

        let mut state = FileSystemState::new();
        for plan in chain.into_iter().rev() {
            overlay(&mut state, plan.layers());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{apply_to_handle, clone_plan, PlanHandle};
    use std::sync::Arc;
    use dualys_types::{ContentId, VfsPath};
    use proptest::prelude::*;

    fn path(s: &str) -> VfsPath {
        VfsPath::new(s).unwrap()
    }

    fn entries(state: &FileSystemState) -> Vec<(&str, &str)> {
        state.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect()
    }

    #[test]
    fn root_plan_materializes_empty() {
        let plan = Plan::root("zero");
        assert!(plan.materialize().is_empty());
        assert!(plan.materialize_uncached().is_empty());
    }

    #[test]
    fn records_within_a_layer_apply_in_order() {
        let mut plan = Plan::root("p");
        plan.apply_layer(
            Layer::new("l")
                .add(path("/a"), "h1")
                .remove(path("/a"))
                .add(path("/b"), "h2")
                .modify(path("/b"), "h3"),
        );

        assert_eq!(entries(&plan.materialize()), [("/b", "h3")]);
    }

    #[test]
    fn layer_order_decides_the_winner() {
        let add = Layer::new("add").add(path("/p"), "h1");
        let modify = Layer::new("modify").modify(path("/p"), "h2");

        let mut forward = Plan::root("forward");
        forward.apply_layer(add.clone());
        forward.apply_layer(modify.clone());
        assert_eq!(forward.materialize().get("/p"), Some(&ContentId::new("h2")));

        let mut reverse = Plan::root("reverse");
        reverse.apply_layer(modify);
        reverse.apply_layer(add);
        assert_eq!(reverse.materialize().get("/p"), Some(&ContentId::new("h1")));
    }

    #[test]
    fn removing_twice_equals_removing_once() {
        let seed = Layer::new("seed").add(path("/a"), "h").add(path("/b"), "h");

        let mut once = Plan::root("once");
        once.apply_layer(seed.clone());
        once.apply_layer(Layer::new("rm").remove(path("/a")));

        let mut twice = Plan::root("twice");
        twice.apply_layer(seed);
        twice.apply_layer(Layer::new("rm").remove(path("/a")).remove(path("/a")));
        twice.apply_layer(Layer::new("rm-missing").remove(path("/never")));

        assert_eq!(once.materialize(), twice.materialize());
        assert_eq!(entries(&once.materialize()), [("/b", "h")]);
    }

    #[test]
    fn clone_materializes_like_source() {
        let mut root = Plan::root("root");
        root.apply_layer(Layer::new("l").add(path("/a"), "1").add(path("/b"), "2"));
        let root = root.into_handle();

        let clone = clone_plan(&root, "clone");
        assert_eq!(clone.materialize(), root.materialize());
    }

    #[test]
    fn clone_is_independent_of_source() {
        let mut root = Plan::root("web-server");
        root.apply_layer(
            Layer::new("nginx_config")
                .add(path("/etc/nginx.conf"), "h1")
                .add(path("/var/www/index.html"), "h2"),
        );
        let root = root.into_handle();

        let mut clone = clone_plan(&root, "web-server-test");
        clone.apply_layer(Layer::new("test_modification").modify(path("/var/www/index.html"), "h3"));

        assert_eq!(
            entries(&clone.materialize()),
            [("/etc/nginx.conf", "h1"), ("/var/www/index.html", "h3")]
        );
        assert_eq!(
            entries(&root.materialize()),
            [("/etc/nginx.conf", "h1"), ("/var/www/index.html", "h2")]
        );
    }

    #[test]
    fn materialization_is_repeatable() {
        let mut plan = Plan::root("p");
        plan.apply_layer(Layer::new("l").add(path("/x"), "1"));
        let first = plan.materialize();
        let second = plan.materialize();
        assert_eq!(first, second);
        assert_eq!(first, plan.materialize_uncached());
    }

    #[test]
    fn apply_layer_invalidates_cache() {
        let mut plan = Plan::root("p");
        plan.apply_layer(Layer::new("one").add(path("/x"), "1"));
        assert_eq!(plan.materialize().get("/x"), Some(&ContentId::new("1")));

        plan.apply_layer(Layer::new("two").modify(path("/x"), "2"));
        assert_eq!(plan.materialize().get("/x"), Some(&ContentId::new("2")));
    }

    #[test]
    fn handle_mutation_invalidates_cache() {
        let mut handle = Plan::root("p").into_handle();
        assert!(handle.materialize().is_empty());

        apply_to_handle(&mut handle, Layer::new("l").add(path("/x"), "1")).unwrap();
        assert_eq!(handle.materialize().len(), 1);
    }

    #[test]
    fn cached_ancestor_is_reused_by_descendants() {
        let mut root = Plan::root("root");
        root.apply_layer(Layer::new("l").add(path("/a"), "1"));
        let root = root.into_handle();
        root.materialize();

        let mid = {
            let mut mid = clone_plan(&root, "mid");
            mid.apply_layer(Layer::new("m").add(path("/b"), "2"));
            mid.into_handle()
        };
        let mut leaf = clone_plan(&mid, "leaf");
        leaf.apply_layer(Layer::new("x").remove(path("/a")));

        assert_eq!(leaf.materialize(), leaf.materialize_uncached());
        assert_eq!(entries(&leaf.materialize()), [("/b", "2")]);
    }

    #[test]
    fn permission_changes_do_not_touch_state() {
        let mut plan = Plan::root("p");
        plan.apply_layer(Layer::new("l").add(path("/bin/app"), "h"));
        let before = plan.materialize();
        plan.apply_layer(Layer::new("chmod").chmod(path("/bin/app")));
        assert_eq!(plan.materialize(), before);
    }

    #[test]
    fn deep_chain_materializes_without_recursion() {
        let mut handle = Plan::root("p0").into_handle();
        for i in 1..2_000 {
            let mut next = clone_plan(&handle, format!("p{i}"));
            next.apply_layer(Layer::new("l").add(path("/depth"), i.to_string()));
            handle = next.into_handle();
        }
        assert_eq!(handle.depth(), 1_999);
        assert_eq!(handle.materialize().get("/depth"), Some(&ContentId::new("1999")));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn plans_and_states_cross_threads() {
        assert_send_sync::<Plan>();
        assert_send_sync::<PlanHandle>();
        assert_send_sync::<FileSystemState>();
    }

    #[test]
    fn siblings_materialize_concurrently() {
        let mut root = Plan::root("root");
        root.apply_layer(Layer::new("seed").add(path("/etc/hosts"), "h0"));
        let root = root.into_handle();

        let siblings: Vec<PlanHandle> = (0..8)
            .map(|i| {
                let mut plan = clone_plan(&root, format!("sibling-{i}"));
                plan.apply_layer(Layer::new("own").add(path(&format!("/srv/{i}")), i.to_string()));
                plan.into_handle()
            })
            .collect();

        let workers: Vec<_> = siblings
            .iter()
            .map(|plan| {
                let plan = Arc::clone(plan);
                std::thread::spawn(move || plan.materialize())
            })
            .collect();

        for (i, worker) in workers.into_iter().enumerate() {
            let state = worker.join().unwrap();
            assert_eq!(state.len(), 2);
            assert_eq!(state.get("/etc/hosts"), Some(&ContentId::new("h0")));
            assert_eq!(state.get(&format!("/srv/{i}")), Some(&ContentId::new(i.to_string())));
        }
        assert_eq!(root.materialize().len(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(u8, u8),
        Modify(u8, u8),
        Remove(u8),
        Chmod(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6, any::<u8>()).prop_map(|(p, c)| Op::Add(p, c)),
            (0u8..6, any::<u8>()).prop_map(|(p, c)| Op::Modify(p, c)),
            (0u8..6).prop_map(Op::Remove),
            (0u8..6).prop_map(Op::Chmod),
        ]
    }

    fn to_layer(idx: usize, ops: &[Op]) -> Layer {
        ops.iter().fold(Layer::new(format!("l{idx}")), |layer, op| match op {
            Op::Add(p, c) => layer.add(path(&format!("/f{p}")), c.to_string()),
            Op::Modify(p, c) => layer.modify(path(&format!("/f{p}")), c.to_string()),
            Op::Remove(p) => layer.remove(path(&format!("/f{p}"))),
            Op::Chmod(p) => layer.chmod(path(&format!("/f{p}"))),
        })
    }

    proptest! {
        #[test]
        fn cache_agrees_with_recomputation(
            base_ops in prop::collection::vec(prop::collection::vec(op_strategy(), 0..6), 0..4),
            branch_ops in prop::collection::vec(prop::collection::vec(op_strategy(), 0..6), 0..4),
        ) {
            let mut base = Plan::root("base");
            for (i, ops) in base_ops.iter().enumerate() {
                base.apply_layer(to_layer(i, ops));
                prop_assert_eq!(base.materialize(), base.materialize_uncached());
            }
            let base = base.into_handle();

            let mut branch = clone_plan(&base, "branch");
            prop_assert_eq!(branch.materialize(), base.materialize());
            for (i, ops) in branch_ops.iter().enumerate() {
                branch.apply_layer(to_layer(i, ops));
                prop_assert_eq!(branch.materialize(), branch.materialize_uncached());
            }
        }

        #[test]
        fn clone_never_changes_source(
            ops in prop::collection::vec(op_strategy(), 0..12),
        ) {
            let mut root = Plan::root("root");
            root.apply_layer(to_layer(0, &[Op::Add(0, 1), Op::Add(1, 2)]));
            let root = root.into_handle();
            let before = root.materialize();

            let mut clone = clone_plan(&root, "clone");
            clone.apply_layer(to_layer(1, &ops));
            clone.materialize();

            prop_assert_eq!(root.materialize(), before);
        }
    }
}
