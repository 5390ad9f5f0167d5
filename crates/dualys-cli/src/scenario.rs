//! The reference scenario: two service plans, a test branch, a merge, and
//! an execution.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use dualys_diff::{diff_plans, StateDiff};
use dualys_exec::{ExecutionEngine, ExecutionOutcome, WasmStrategy};
use dualys_merge::Merger;
use dualys_plan::FileSystemState;
use dualys_registry::PlanRegistry;
use dualys_types::{vfs_path, ContentId, Layer, PlanId};

use crate::config::DualysConfig;

/// One registered plan as it stands at the end of the scenario.
#[derive(Debug, Serialize)]
pub struct PlanSummary {
    /// Plan ids from the root down to this plan.
    pub ancestry: Vec<PlanId>,
    /// Number of the plan's own layers.
    pub layers: usize,
    /// Materialized state.
    pub state: FileSystemState,
}

/// Everything the scenario produced.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    /// Every registered plan, keyed by plan id.
    pub plans: BTreeMap<PlanId, PlanSummary>,
    /// What the test branch changed relative to its source.
    pub branch_diff: StateDiff,
    /// The merge error, if the merge was rejected.
    pub merge_error: Option<String>,
    /// Result of executing the web-server plan.
    pub execution: ExecutionOutcome,
}

/// Run the scenario against a fresh registry.
///
/// When `module` is given, its bytes are staged into the web-server plan at
/// the configured entry point before the plan is branched.
pub fn run_demo(config: &DualysConfig, module: Option<&[u8]>) -> anyhow::Result<DemoReport> {
    let registry = PlanRegistry::new();
    let web = PlanId::new("web-server");
    let db = PlanId::new("database");
    let test = PlanId::new("web-server-test");
    let full_stack = PlanId::new("full-stack");

    registry.create(web.clone())?;
    registry.create(db.clone())?;

    registry.apply_layer(
        &web,
        Layer::new("nginx_config")
            .add(vfs_path!("/etc/nginx.conf"), "hash_nginx_conf_v1")
            .add(vfs_path!("/var/www/index.html"), "hash_html_hello"),
    )?;
    registry.apply_layer(
        &web,
        Layer::new("wasm_app").add(vfs_path!("/app/main.wasm"), "hash_webapp_123"),
    )?;
    registry.apply_layer(
        &db,
        Layer::new("postgres_config")
            .add(vfs_path!("/etc/postgres.conf"), "hash_pg_conf_standard")
            .add(vfs_path!("/data/db_init.sql"), "hash_init_script"),
    )?;

    if let Some(module) = module {
        registry.apply_layer(
            &web,
            Layer::new("wasm_module").add(config.wasm.entry_point.clone(), ContentId::of_bytes(module)),
        )?;
    }

    // Branching freezes web-server: it is now the test plan's base.
    registry.branch(&web, test.clone())?;
    registry.apply_layer(
        &test,
        Layer::new("test_modification").modify(vfs_path!("/var/www/index.html"), "hash_html_test_page"),
    )?;

    let merger = Merger::new(config.merge.clone());
    let merge_error = match registry.merge(full_stack, &web, &db, &merger) {
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "merge failed");
            Some(err.to_string())
        }
    };

    let web_plan = registry.require(&web)?;
    let test_plan = registry.require(&test)?;
    let branch_diff = diff_plans(&web_plan, &test_plan);

    let engine = ExecutionEngine::with_strategy(Box::new(WasmStrategy::new(config.wasm.clone())));
    let execution = engine.run(&web_plan)?.outcome;

    let mut plans = BTreeMap::new();
    for id in registry.ids()? {
        let plan = registry.require(&id)?;
        let summary = PlanSummary {
            ancestry: plan.ancestry().into_iter().cloned().collect(),
            layers: plan.layer_count(),
            state: plan.materialize(),
        };
        plans.insert(id, summary);
    }

    Ok(DemoReport {
        plans,
        branch_diff,
        merge_error,
        execution,
    })
}
