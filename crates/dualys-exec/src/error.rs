/// Errors that can occur while running a plan.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// `run` was called before any strategy was set.
    #[error("no execution strategy has been set")]
    NoStrategy,

    /// A strategy failed for a reason of its own.
    #[error("strategy '{strategy}' failed: {reason}")]
    Strategy { strategy: String, reason: String },
}

impl ExecError {
    /// Create a strategy error with a name and reason.
    pub fn strategy(strategy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Strategy {
            strategy: strategy.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for execution results.
pub type ExecResult<T> = Result<T, ExecError>;
