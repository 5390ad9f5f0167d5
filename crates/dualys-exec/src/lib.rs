//! Execution engine for Dualys plans.
//!
//! The engine does not know how to run a plan. It delegates to one
//! [`ExecutionStrategy`], chosen at configuration time, which materializes
//! the plan and interprets the resulting state.
//!
//! # Key Types
//!
//! - [`ExecutionStrategy`] -- The capability "consume a plan, produce an outcome"
//! - [`WasmStrategy`] -- Locates a WebAssembly entry point in the plan's state
//! - [`DryRunStrategy`] -- Materializes and reports without running anything
//! - [`ExecutionEngine`] -- Holds at most one strategy and runs plans with it

pub mod config;
pub mod engine;
pub mod error;
pub mod strategies;
pub mod strategy;

pub use config::WasmConfig;
pub use engine::{ExecutionEngine, ExecutionReport};
pub use error::{ExecError, ExecResult};
pub use strategies::{DryRunStrategy, WasmStrategy};
pub use strategy::{ExecutionOutcome, ExecutionStrategy};
