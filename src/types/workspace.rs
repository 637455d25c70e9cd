//! One named, independent graph owned by the canvas registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TreeEdge, TreeNode, Viewport};

/// One named, independent graph owned by the canvas registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
  pub id: String,
  pub name: String,
  pub nodes: Vec<TreeNode>,
  pub edges: Vec<TreeEdge>,
  pub viewport: Viewport,
  pub updated_at: DateTime<Utc>,
}

impl Workspace {
  /// An empty workspace with the given stable id.
  pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      nodes: Vec::new(),
      edges: Vec::new(),
      viewport: Viewport::default(),
      updated_at: Utc::now(),
    }
  }

  /// Storage tree id under which this workspace's snapshot is persisted.
  pub fn tree_id(&self) -> String {
    tree_id_for(&self.id)
  }
}

/// Storage tree id for a workspace id (`space:<id>`).
pub fn tree_id_for(workspace_id: &str) -> String {
  format!("space:{workspace_id}")
}
