//! Progressive Build Controller: reveals a final graph node by node.
//!
//! A build is split in two halves. [WorkspaceStore::begin_build] runs under
//! the store lock, claims a fresh generation token and resets the visible
//! graph to the root. [BuildPlan::run] then reveals the remaining nodes in
//! breadth-first order, sleeping between steps. After every sleep it re-locks
//! the store and compares tokens; a newer build or a cancel makes it return
//! without touching the store again.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::graph::{bfs_order, layout_children_simple, with_auto_handles};
use crate::store::{SharedStore, WorkspaceStore};
use crate::types::{ROOT_ID, TreeEdge, TreeNode};

/// Default pause after revealing a node.
pub const DEFAULT_NODE_DELAY: Duration = Duration::from_millis(140);
/// Default pause after revealing an edge.
pub const DEFAULT_EDGE_DELAY: Duration = Duration::from_millis(80);

/// Pacing and starting point of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
  /// Node revealed first; falls back to the first node when absent.
  pub root_id: String,
  pub node_delay: Duration,
  pub edge_delay: Duration,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      root_id: ROOT_ID.to_string(),
      node_delay: DEFAULT_NODE_DELAY,
      edge_delay: DEFAULT_EDGE_DELAY,
    }
  }
}

impl BuildOptions {
  pub fn with_delays(mut self, node_delay: Duration, edge_delay: Duration) -> Self {
    self.node_delay = node_delay;
    self.edge_delay = edge_delay;
    self
  }

  pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
    self.root_id = root_id.into();
    self
  }
}

/// How a build ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
  /// Every reachable node was revealed and the final edge set installed.
  Completed { revealed: usize },
  /// A newer build or a cancel took over after `revealed` nodes were shown.
  Cancelled { revealed: usize },
  /// The final graph had no nodes.
  Empty,
}

/// The remaining work of a build after [WorkspaceStore::begin_build].
#[derive(Debug)]
pub struct BuildPlan {
  token: u64,
  order: Vec<String>,
  nodes_by_id: HashMap<String, TreeNode>,
  edge_by_target: HashMap<String, TreeEdge>,
  final_edges: Vec<TreeEdge>,
  node_delay: Duration,
  edge_delay: Duration,
}

impl WorkspaceStore {
  /// Starts a build: claims a new token, shows only the root and selects it.
  ///
  /// Returns `None` (and leaves the store idle) when `final_nodes` is empty.
  #[instrument(level = "trace", skip_all, fields(nodes = final_nodes.len(), edges = final_edges.len()))]
  pub fn begin_build(
    &mut self,
    final_nodes: Vec<TreeNode>,
    final_edges: Vec<TreeEdge>,
    options: &BuildOptions,
  ) -> Option<BuildPlan> {
    self.build_token += 1;
    self.is_building = true;
    let token = self.build_token;

    let root = final_nodes
      .iter()
      .find(|n| n.id == options.root_id)
      .or_else(|| final_nodes.first())
      .cloned();
    let Some(root) = root else {
      self.is_building = false;
      debug!("begin_build: empty graph");
      return None;
    };

    let order: Vec<String> = bfs_order(&root.id, &final_nodes, &final_edges)
      .into_iter()
      .skip(1)
      .collect();
    let edge_by_target: HashMap<String, TreeEdge> = final_edges
      .iter()
      .map(|e| (e.target.clone(), e.clone()))
      .collect();
    let nodes_by_id: HashMap<String, TreeNode> = final_nodes
      .into_iter()
      .map(|n| (n.id.clone(), n))
      .collect();

    self.selected_node_id = Some(root.id.clone());
    self.nodes = vec![root];
    self.edges.clear();
    self.touch();
    info!(token, steps = order.len(), "build started");

    Some(BuildPlan {
      token,
      order,
      nodes_by_id,
      edge_by_target,
      final_edges,
      node_delay: options.node_delay,
      edge_delay: options.edge_delay,
    })
  }
}

impl BuildPlan {
  pub fn token(&self) -> u64 {
    self.token
  }

  /// Ids still to be revealed, in order.
  pub fn order(&self) -> &[String] {
    &self.order
  }

  /// Reveals the remaining nodes, checking the token after every pause.
  pub async fn run(self, store: SharedStore) -> BuildOutcome {
    let mut revealed = 1;
    for id in &self.order {
      let Some(node) = self.nodes_by_id.get(id) else {
        continue;
      };
      {
        let mut guard = store.lock().await;
        if guard.build_token != self.token {
          return self.cancelled(revealed);
        }
        guard.nodes.push(node.clone());
        guard.touch();
      }
      revealed += 1;
      tokio::time::sleep(self.node_delay).await;

      let Some(incoming) = self.edge_by_target.get(id) else {
        continue;
      };
      {
        let mut guard = store.lock().await;
        if guard.build_token != self.token {
          return self.cancelled(revealed);
        }
        guard.edges.push(incoming.clone());
        guard.refresh_handles();
        guard.touch();
      }
      tokio::time::sleep(self.edge_delay).await;

      let mut guard = store.lock().await;
      if guard.build_token != self.token {
        return self.cancelled(revealed);
      }
      let s = &mut *guard;
      layout_children_simple(&incoming.source, &mut s.nodes, &s.edges);
      s.refresh_handles();
    }

    let mut guard = store.lock().await;
    if guard.build_token != self.token {
      return self.cancelled(revealed);
    }
    let s = &mut *guard;
    s.edges = with_auto_handles(&s.nodes, self.final_edges);
    s.is_building = false;
    s.touch();
    info!(token = self.token, revealed, "build completed");
    BuildOutcome::Completed { revealed }
  }

  fn cancelled(&self, revealed: usize) -> BuildOutcome {
    info!(token = self.token, revealed, "build superseded");
    BuildOutcome::Cancelled { revealed }
  }
}

/// Runs a complete build against `store`.
pub async fn build_from_tree(
  store: SharedStore,
  final_nodes: Vec<TreeNode>,
  final_edges: Vec<TreeEdge>,
  options: BuildOptions,
) -> BuildOutcome {
  let plan = store
    .lock()
    .await
    .begin_build(final_nodes, final_edges, &options);
  match plan {
    Some(plan) => plan.run(store).await,
    None => BuildOutcome::Empty,
  }
}
