//! Engine configuration: storage location, build pacing, autosave and quota.
//!
//! Values come from defaults, an optional JSON file, and `TREEFLOW_*`
//! environment variables, in increasing precedence.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::build::BuildOptions;
use crate::error::PersistError;
use crate::types::DEFAULT_DAILY_LIMIT;

pub const ENV_STORAGE_DIR: &str = "TREEFLOW_STORAGE_DIR";
pub const ENV_NODE_DELAY_MS: &str = "TREEFLOW_NODE_DELAY_MS";
pub const ENV_EDGE_DELAY_MS: &str = "TREEFLOW_EDGE_DELAY_MS";
pub const ENV_AUTOSAVE_DEBOUNCE_MS: &str = "TREEFLOW_AUTOSAVE_DEBOUNCE_MS";
pub const ENV_DAILY_LIMIT: &str = "TREEFLOW_DAILY_LIMIT";

/// Default directory of the file-backed store.
pub const DEFAULT_STORAGE_DIR: &str = ".treeflow";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  pub storage_dir: PathBuf,
  pub node_delay_ms: u64,
  pub edge_delay_ms: u64,
  pub autosave_debounce_ms: u64,
  pub daily_limit: u32,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
      node_delay_ms: 140,
      edge_delay_ms: 80,
      autosave_debounce_ms: 500,
      daily_limit: DEFAULT_DAILY_LIMIT,
    }
  }
}

fn parse_override<T: FromStr>(name: &str, raw: Option<String>, target: &mut T) {
  let Some(raw) = raw else {
    return;
  };
  match raw.trim().parse() {
    Ok(v) => *target = v,
    Err(_) => warn!(name, value = %raw, "ignoring unparsable environment override"),
  }
}

impl EngineConfig {
  /// Defaults with environment overrides applied.
  pub fn from_env() -> Self {
    Self::default().with_overrides(|name| std::env::var(name).ok())
  }

  /// Reads a JSON config file; missing keys keep their defaults.
  pub fn from_json_file(path: &Path) -> Result<Self, PersistError> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(PersistError::InvalidJson)
  }

  /// Applies `TREEFLOW_*` overrides looked up through `lookup`.
  pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|d| !d.trim().is_empty()) {
      self.storage_dir = PathBuf::from(dir);
    }
    parse_override(ENV_NODE_DELAY_MS, lookup(ENV_NODE_DELAY_MS), &mut self.node_delay_ms);
    parse_override(ENV_EDGE_DELAY_MS, lookup(ENV_EDGE_DELAY_MS), &mut self.edge_delay_ms);
    parse_override(
      ENV_AUTOSAVE_DEBOUNCE_MS,
      lookup(ENV_AUTOSAVE_DEBOUNCE_MS),
      &mut self.autosave_debounce_ms,
    );
    parse_override(ENV_DAILY_LIMIT, lookup(ENV_DAILY_LIMIT), &mut self.daily_limit);
    self
  }

  pub fn autosave_debounce(&self) -> Duration {
    Duration::from_millis(self.autosave_debounce_ms)
  }

  pub fn build_options(&self) -> BuildOptions {
    BuildOptions::default().with_delays(
      Duration::from_millis(self.node_delay_ms),
      Duration::from_millis(self.edge_delay_ms),
    )
  }
}
