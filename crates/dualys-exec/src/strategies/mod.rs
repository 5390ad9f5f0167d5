//! Built-in execution strategies.

pub mod dry_run;
pub mod wasm;

pub use dry_run::DryRunStrategy;
pub use wasm::WasmStrategy;
