//! Workbench: the canvas registry, the live store and autosave wired together.
//!
//! Edits happen on the shared live store. [Workbench::commit] writes them back
//! into the active registry slot and schedules a debounced save. Switching
//! workspaces cancels the outgoing workspace's pending save before the live
//! store is re-hydrated, so stale content is never written under the wrong key.

use tracing::{info, instrument};

use crate::autosave::AutoSaver;
use crate::build::{BuildOutcome, build_from_tree};
use crate::canvas::CanvasRegistry;
use crate::config::EngineConfig;
use crate::persistence::PersistenceAdapter;
use crate::store::{SharedStore, WorkspaceStore};
use crate::types::{TreeEdge, TreeNode, tree_id_for};

#[derive(Debug)]
pub struct Workbench {
  config: EngineConfig,
  adapter: PersistenceAdapter,
  registry: CanvasRegistry,
  store: SharedStore,
  autosaver: AutoSaver,
}

impl Workbench {
  /// Opens the default workspaces and hydrates the first one.
  pub async fn open(config: EngineConfig, adapter: PersistenceAdapter) -> Self {
    let registry = CanvasRegistry::with_defaults(adapter.clone());
    let autosaver = AutoSaver::new(adapter.clone(), config.autosave_debounce());
    let store = WorkspaceStore::default()
      .with_daily_limit(config.daily_limit)
      .into_shared();
    let mut bench = Self {
      config,
      adapter,
      registry,
      store,
      autosaver,
    };
    bench.hydrate_active().await;
    bench
  }

  pub fn registry(&self) -> &CanvasRegistry {
    &self.registry
  }

  pub fn store(&self) -> SharedStore {
    self.store.clone()
  }

  pub fn autosaver(&self) -> &AutoSaver {
    &self.autosaver
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  /// Writes the live graph into the active slot and schedules its save.
  #[instrument(level = "trace", skip(self))]
  pub async fn commit(&mut self) {
    let store = self.store.lock().await;
    if let Some(slot) = self.registry.active_mut() {
      store.write_back(slot);
    }
    let tree_id = tree_id_for(self.registry.active_id());
    self
      .autosaver
      .schedule(&tree_id, store.persistable_snapshot());
  }

  /// Makes `id` the active workspace and loads it into the live store.
  ///
  /// The outgoing workspace keeps its live graph in its slot. The incoming one
  /// is hydrated from its slot, else from storage, else with a fresh default
  /// graph.
  #[instrument(level = "trace", skip(self))]
  pub async fn switch_to(&mut self, id: &str) -> bool {
    if self.registry.get(id).is_none() {
      return false;
    }
    self.park_active().await;
    self.registry.set_active(id);
    self.hydrate_active().await;
    info!(workspace_id = id, "switched workspace");
    true
  }

  /// Adds a workspace and switches to it.
  pub async fn add_workspace(&mut self, name: &str) -> String {
    self.park_active().await;
    let id = self.registry.add_workspace(name);
    self.hydrate_active().await;
    id
  }

  pub fn rename_workspace(&mut self, id: &str, name: &str) -> bool {
    self.registry.rename_workspace(id, name)
  }

  /// Deletes a workspace; the live store follows when the active one goes.
  pub async fn delete_workspace(&mut self, id: &str) -> bool {
    let was_active = self.registry.active_id() == id;
    self.autosaver.cancel_for(&tree_id_for(id));
    if !self.registry.delete_workspace(id) {
      return false;
    }
    if was_active {
      self.hydrate_active().await;
    }
    true
  }

  /// Progressively builds `nodes`/`edges` into the live store, then commits.
  pub async fn build(&mut self, nodes: Vec<TreeNode>, edges: Vec<TreeEdge>) -> BuildOutcome {
    let outcome = build_from_tree(self.store.clone(), nodes, edges, self.config.build_options()).await;
    if matches!(outcome, BuildOutcome::Completed { .. }) {
      self.commit().await;
    }
    outcome
  }

  /// Writes the live graph into the active slot and drops its pending save.
  async fn park_active(&mut self) {
    let store = self.store.lock().await;
    if let Some(slot) = self.registry.active_mut() {
      store.write_back(slot);
    }
    let previous = tree_id_for(self.registry.active_id());
    self.autosaver.cancel_for(&previous);
  }

  async fn hydrate_active(&mut self) {
    let Some(slot) = self.registry.active().cloned() else {
      return;
    };
    let tree_id = slot.tree_id();
    let mut store = self.store.lock().await;
    if !slot.nodes.is_empty() || !store.load_tree(&self.adapter, &tree_id) {
      store.hydrate_workspace(&slot);
    }
    store.meta.name = slot.name.clone();
  }
}
