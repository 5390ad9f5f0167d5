use std::time::{Duration, Instant};

use tracing::info;

use dualys_plan::Plan;

use crate::error::{ExecError, ExecResult};
use crate::strategy::{ExecutionOutcome, ExecutionStrategy};

// ---------------------------------------------------------------------------
// ExecutionReport
// ---------------------------------------------------------------------------

/// The outcome of running a plan through the engine.
#[derive(Clone, Debug)]
pub struct ExecutionReport {
    /// Name of the strategy that ran.
    pub strategy: String,
    /// What the strategy did.
    pub outcome: ExecutionOutcome,
    /// Wall-clock time the strategy took.
    pub elapsed: Duration,
}

impl ExecutionReport {
    /// Returns `true` if the plan was executed (or inspected).
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

// ---------------------------------------------------------------------------
// ExecutionEngine
// ---------------------------------------------------------------------------

/// Runs plans with the currently selected strategy.
///
/// The engine holds at most one strategy; setting a new one replaces the
/// previous one.
#[derive(Default)]
pub struct ExecutionEngine {
    strategy: Option<Box<dyn ExecutionStrategy>>,
}

impl ExecutionEngine {
    /// Create an engine with no strategy selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with `strategy` selected.
    pub fn with_strategy(strategy: Box<dyn ExecutionStrategy>) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Select the strategy used by [`Self::run`].
    pub fn set_strategy(&mut self, strategy: Box<dyn ExecutionStrategy>) {
        info!(strategy = strategy.name(), "execution strategy set");
        self.strategy = Some(strategy);
    }

    /// Name of the selected strategy, if any.
    pub fn strategy_name(&self) -> Option<&str> {
        self.strategy.as_deref().map(|s| s.name())
    }

    /// Run `plan` with the selected strategy.
    ///
    /// Fails with [`ExecError::NoStrategy`] if no strategy has been set.
    pub fn run(&self, plan: &Plan) -> ExecResult<ExecutionReport> {
        let strategy = self.strategy.as_deref().ok_or(ExecError::NoStrategy)?;

        info!(plan = %plan.id(), strategy = strategy.name(), "execution started");
        let start = Instant::now();
        let outcome = strategy.execute(plan)?;
        let elapsed = start.elapsed();
        info!(
            plan = %plan.id(),
            strategy = strategy.name(),
            success = outcome.is_success(),
            ?elapsed,
            "execution finished"
        );

        Ok(ExecutionReport {
            strategy: strategy.name().to_string(),
            outcome,
            elapsed,
        })
    }
}

impl std::fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("strategy", &self.strategy_name())
            .finish()
    }
}
