//! Versioned, serializable state of one workspace.

use serde::{Deserialize, Serialize};

use super::{TreeEdge, TreeNode, Viewport};

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Editor UI state that survives a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
  #[serde(default)]
  pub selected_node_id: Option<String>,
}

/// Versioned, serializable state of one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
  pub schema_version: u32,
  pub tree_id: String,
  /// RFC 3339 timestamp of when the snapshot was taken.
  pub updated_at: String,
  pub nodes: Vec<TreeNode>,
  pub edges: Vec<TreeEdge>,
  pub viewport: Viewport,
  #[serde(default)]
  pub ui: UiState,
}
