//! Canvas Registry: the set of named workspaces and which one is active.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::ids::new_workspace_id;
use crate::persistence::PersistenceAdapter;
use crate::types::{TreeEdge, TreeNode, Viewport, Workspace, tree_id_for};

/// Workspaces present at first run, as `(id, name)`. Ids are stable so
/// restarts reattach to the same persisted records.
pub const DEFAULT_WORKSPACES: [(&str, &str); 3] = [
  ("body", "Body"),
  ("education", "Education"),
  ("career", "Career"),
];

#[derive(Debug, Clone)]
pub struct CanvasRegistry {
  workspaces: Vec<Workspace>,
  active_id: String,
  persistence: PersistenceAdapter,
}

impl CanvasRegistry {
  /// The default workspaces, the first one active.
  pub fn with_defaults(persistence: PersistenceAdapter) -> Self {
    let workspaces: Vec<Workspace> = DEFAULT_WORKSPACES
      .iter()
      .map(|(id, name)| Workspace::empty(*id, *name))
      .collect();
    Self {
      active_id: DEFAULT_WORKSPACES[0].0.to_string(),
      workspaces,
      persistence,
    }
  }

  pub fn workspaces(&self) -> &[Workspace] {
    &self.workspaces
  }

  pub fn get(&self, id: &str) -> Option<&Workspace> {
    self.workspaces.iter().find(|w| w.id == id)
  }

  pub fn active_id(&self) -> &str {
    &self.active_id
  }

  pub fn active(&self) -> Option<&Workspace> {
    self.get(&self.active_id)
  }

  pub fn active_mut(&mut self) -> Option<&mut Workspace> {
    let id = self.active_id.clone();
    self.workspaces.iter_mut().find(|w| w.id == id)
  }

  /// Appends an empty workspace with a fresh id and activates it.
  pub fn add_workspace(&mut self, name: &str) -> String {
    let id = new_workspace_id();
    self.workspaces.push(Workspace::empty(id.clone(), name));
    self.active_id = id.clone();
    info!(workspace_id = %id, name, "workspace added");
    id
  }

  pub fn rename_workspace(&mut self, id: &str, name: &str) -> bool {
    let Some(ws) = self.workspaces.iter_mut().find(|w| w.id == id) else {
      debug!(id, "rename_workspace: unknown workspace");
      return false;
    };
    ws.name = name.to_string();
    ws.updated_at = Utc::now();
    true
  }

  /// Deletes a workspace and purges its persisted record.
  ///
  /// The last remaining workspace is never deleted. A failed purge is logged
  /// and the deletion goes ahead. When the active workspace is deleted the
  /// first remaining one becomes active.
  #[instrument(level = "trace", skip(self))]
  pub fn delete_workspace(&mut self, id: &str) -> bool {
    if self.workspaces.len() <= 1 {
      debug!(id, "delete_workspace: refusing to delete the last workspace");
      return false;
    }
    let Some(index) = self.workspaces.iter().position(|w| w.id == id) else {
      debug!(id, "delete_workspace: unknown workspace");
      return false;
    };
    let tree_id = tree_id_for(id);
    if let Err(e) = self.persistence.clear(&tree_id) {
      warn!(tree_id, error = %e, "failed to purge workspace storage");
    }
    self.workspaces.remove(index);
    if self.active_id == id {
      if let Some(first) = self.workspaces.first() {
        self.active_id = first.id.clone();
      }
    }
    info!(workspace_id = id, active = %self.active_id, "workspace deleted");
    true
  }

  /// Points the registry at another workspace. Unknown ids are ignored.
  pub fn set_active(&mut self, id: &str) -> bool {
    if self.get(id).is_none() {
      debug!(id, "set_active: unknown workspace");
      return false;
    }
    self.active_id = id.to_string();
    true
  }

  pub fn set_nodes(&mut self, nodes: Vec<TreeNode>) {
    if let Some(ws) = self.active_mut() {
      ws.nodes = nodes;
      ws.updated_at = Utc::now();
    }
  }

  pub fn set_edges(&mut self, edges: Vec<TreeEdge>) {
    if let Some(ws) = self.active_mut() {
      ws.edges = edges;
      ws.updated_at = Utc::now();
    }
  }

  pub fn set_viewport(&mut self, viewport: Viewport) {
    if let Some(ws) = self.active_mut() {
      ws.viewport = viewport;
      ws.updated_at = Utc::now();
    }
  }
}
