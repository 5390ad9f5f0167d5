use serde::{Deserialize, Serialize};

use dualys_types::{vfs_path, VfsPath};

/// Default entry point looked up by [`WasmStrategy`](crate::WasmStrategy).
pub const DEFAULT_WASM_ENTRY_POINT: &str = "/main.wasm";

/// Configuration for the WebAssembly strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmConfig {
    /// Path of the module to run, looked up in the materialized state.
    #[serde(default = "default_entry_point")]
    pub entry_point: VfsPath,
}

fn default_entry_point() -> VfsPath {
    vfs_path!(DEFAULT_WASM_ENTRY_POINT)
}

impl Default for WasmConfig {
    fn default() -> Self {
        Self {
            entry_point: default_entry_point(),
        }
    }
}

impl WasmConfig {
    /// Look the module up at `entry_point` instead of the default.
    pub fn with_entry_point(entry_point: VfsPath) -> Self {
        Self { entry_point }
    }
}
