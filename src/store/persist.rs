//! Snapshot glue between the live store and a [PersistenceAdapter].

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument};

use super::WorkspaceStore;
use crate::error::PersistError;
use crate::persistence::{PersistenceAdapter, export_snapshot, read_snapshot_file};
use crate::types::{
  PersistedSnapshot, ROOT_ID, SCHEMA_VERSION, TreeNode, UiState, Viewport, Workspace,
};

impl WorkspaceStore {
  /// Versioned snapshot of the graph, viewport and selection.
  pub fn persistable_snapshot(&self) -> PersistedSnapshot {
    PersistedSnapshot {
      schema_version: SCHEMA_VERSION,
      tree_id: self.meta.tree_id.clone(),
      updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
      nodes: self.nodes.clone(),
      edges: self.edges.clone(),
      viewport: self.viewport,
      ui: UiState {
        selected_node_id: self.selected_node_id.clone(),
      },
    }
  }

  /// Replaces the live graph with `snapshot`. Any in-flight build is cancelled.
  pub fn hydrate(&mut self, snapshot: PersistedSnapshot) {
    self.cancel_build();
    self.nodes = snapshot.nodes;
    self.edges = snapshot.edges;
    self.refresh_handles();
    self.viewport = snapshot.viewport;
    self.selected_node_id = snapshot.ui.selected_node_id;
    self.meta.tree_id = snapshot.tree_id;
    self.meta.updated_at = DateTime::parse_from_rfc3339(&snapshot.updated_at)
      .map(|t| t.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now());
  }

  /// Replaces the live graph with a registry slot, or with the fresh seed when
  /// the slot is empty.
  pub fn hydrate_workspace(&mut self, workspace: &Workspace) {
    self.cancel_build();
    self.meta.tree_id = workspace.tree_id();
    self.meta.name = workspace.name.clone();
    if workspace.nodes.is_empty() {
      self.reseed();
      return;
    }
    self.nodes = workspace.nodes.clone();
    self.edges = workspace.edges.clone();
    self.refresh_handles();
    self.viewport = workspace.viewport;
    self.selected_node_id = self.node(ROOT_ID).map(|n| n.id.clone());
    self.meta.updated_at = workspace.updated_at;
  }

  /// Hydrates from the stored snapshot of `tree_id`; false when nothing usable is stored.
  #[instrument(level = "trace", skip(self, adapter))]
  pub fn load_tree(&mut self, adapter: &PersistenceAdapter, tree_id: &str) -> bool {
    match adapter.load(tree_id) {
      Some(snapshot) => {
        self.hydrate(snapshot);
        info!(tree_id, "loaded tree");
        true
      }
      None => {
        info!(tree_id, "no saved state, using defaults");
        false
      }
    }
  }

  pub fn save_tree(&self, adapter: &PersistenceAdapter, tree_id: &str) -> Result<(), PersistError> {
    adapter.save(tree_id, &self.persistable_snapshot())
  }

  /// Clears the stored snapshot of `tree_id` and reseeds the live graph.
  #[instrument(level = "trace", skip(self, adapter))]
  pub fn reset_tree(&mut self, adapter: &PersistenceAdapter, tree_id: &str) -> Result<(), PersistError> {
    adapter.clear(tree_id)?;
    self.cancel_build();
    self.meta.tree_id = tree_id.to_string();
    self.reseed();
    info!(tree_id, "reset tree to defaults");
    Ok(())
  }

  /// Writes the current snapshot as a standalone JSON file into `dir`.
  pub fn export_tree(&self, dir: &Path) -> Result<PathBuf, PersistError> {
    export_snapshot(dir, &self.persistable_snapshot())
  }

  /// Loads an exported file into the live store and saves it under `tree_id`.
  ///
  /// The live store keeps the imported graph even when the save fails.
  #[instrument(level = "trace", skip(self, adapter))]
  pub fn import_tree(
    &mut self,
    adapter: &PersistenceAdapter,
    tree_id: &str,
    path: &Path,
  ) -> Result<(), PersistError> {
    let mut snapshot = read_snapshot_file(path)?;
    snapshot.tree_id = tree_id.to_string();
    self.hydrate(snapshot.clone());
    adapter.save(tree_id, &snapshot)?;
    info!(tree_id, path = %path.display(), "imported tree");
    Ok(())
  }

  fn reseed(&mut self) {
    self.nodes = vec![TreeNode::default_root()];
    self.edges.clear();
    self.viewport = Viewport::default();
    self.selected_node_id = Some(ROOT_ID.to_string());
    self.touch();
  }
}
