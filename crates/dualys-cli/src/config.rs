use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use dualys_exec::WasmConfig;
use dualys_merge::MergeConfig;

/// Aggregate configuration read from `--config`.
///
/// Every section is optional; missing sections fall back to their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualysConfig {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub wasm: WasmConfig,
}

impl DualysConfig {
    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
