use tracing::{info, warn};

use dualys_plan::Plan;

use crate::config::WasmConfig;
use crate::error::ExecResult;
use crate::strategy::{ExecutionOutcome, ExecutionStrategy};

/// WebAssembly execution strategy.
///
/// Materializes the plan and looks for the configured entry-point module.
/// The sandboxed runtime is not part of this crate: when the module is
/// present the strategy reports which content would be loaded.
#[derive(Clone, Debug, Default)]
pub struct WasmStrategy {
    config: WasmConfig,
}

impl WasmStrategy {
    pub fn new(config: WasmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WasmConfig {
        &self.config
    }
}

impl ExecutionStrategy for WasmStrategy {
    fn name(&self) -> &str {
        "wasm"
    }

    fn execute(&self, plan: &Plan) -> ExecResult<ExecutionOutcome> {
        let state = plan.materialize();
        let entry_point = &self.config.entry_point;

        match state.get(entry_point.as_str()) {
            Some(content) => {
                info!(plan = %plan.id(), entry_point = %entry_point, content = %content, "wasm entry point found");
                Ok(ExecutionOutcome::Completed {
                    plan: plan.id().clone(),
                    entry_point: entry_point.clone(),
                    content: content.clone(),
                })
            }
            None => {
                warn!(plan = %plan.id(), entry_point = %entry_point, "wasm entry point not found in plan");
                Ok(ExecutionOutcome::EntryPointMissing {
                    plan: plan.id().clone(),
                    entry_point: entry_point.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualys_types::{ContentId, Layer, VfsPath};

    fn path(s: &str) -> VfsPath {
        VfsPath::new(s).unwrap()
    }

    #[test]
    fn finds_default_entry_point() {
        let mut plan = Plan::root("app");
        plan.apply_layer(Layer::new("wasm_app").add(path("/main.wasm"), "hash_webapp_123"));

        let outcome = WasmStrategy::default().execute(&plan).unwrap();
        assert_eq!(
            outcome,
            ExecutionOutcome::Completed {
                plan: plan.id().clone(),
                entry_point: path("/main.wasm"),
                content: ContentId::new("hash_webapp_123"),
            }
        );
    }

    #[test]
    fn reports_missing_entry_point() {
        let mut plan = Plan::root("web-server");
        plan.apply_layer(Layer::new("wasm_app").add(path("/app/main.wasm"), "hash_webapp_123"));

        let outcome = WasmStrategy::default().execute(&plan).unwrap();
        assert!(matches!(outcome, ExecutionOutcome::EntryPointMissing { .. }));
        assert!(!outcome.is_success());
    }

    #[test]
    fn honours_configured_entry_point() {
        let mut plan = Plan::root("web-server");
        plan.apply_layer(Layer::new("wasm_app").add(path("/app/main.wasm"), "hash_webapp_123"));

        let strategy = WasmStrategy::new(WasmConfig::with_entry_point(path("/app/main.wasm")));
        assert!(strategy.execute(&plan).unwrap().is_success());
    }

    #[test]
    fn removed_entry_point_is_missing() {
        let mut plan = Plan::root("app");
        plan.apply_layer(Layer::new("add").add(path("/main.wasm"), "h"));
        plan.apply_layer(Layer::new("rm").remove(path("/main.wasm")));

        let outcome = WasmStrategy::default().execute(&plan).unwrap();
        assert!(!outcome.is_success());
    }
}
