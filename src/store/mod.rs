//! Workspace Store: the mutable working copy of one workspace.
//!
//! - structural edits (add, delete, duplicate, connect, relayout) in `edit`
//! - incremental UI deltas ([NodeChange], [EdgeChange]) in `changes`
//! - chat log and daily quota in `session`
//! - snapshot, hydrate and storage glue in `persist`
//!
//! Invalid arguments (unknown ids, deleting the root, out-of-range counts) are
//! silent no-ops. Every mutation of nodes or edges re-derives automatic edge
//! handles before returning.

mod changes;
#[cfg(test)]
mod changes_test;
mod edit;
#[cfg(test)]
mod edit_test;
mod persist;
#[cfg(test)]
mod persist_test;
mod session;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::graph::with_auto_handles;
use crate::types::{
  ChatMessage, ChatScope, DailyUses, ROOT_ID, TreeEdge, TreeMeta, TreeNode, Viewport, Workspace,
};

pub use changes::{EdgeChange, NodeChange};

/// A store shared between the UI side and an in-flight progressive build.
pub type SharedStore = Arc<Mutex<WorkspaceStore>>;

/// Connection the user started dragging but has not yet typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
  pub source: String,
  pub target: String,
}

/// Mutable state of the live workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
  pub(crate) meta: TreeMeta,
  pub(crate) nodes: Vec<TreeNode>,
  pub(crate) edges: Vec<TreeEdge>,
  pub(crate) viewport: Viewport,
  pub(crate) selected_node_id: Option<String>,
  pub(crate) chat: Vec<ChatMessage>,
  pub(crate) chat_scope: ChatScope,
  pub(crate) daily_uses: DailyUses,
  pub(crate) pending_connection: Option<PendingConnection>,
  pub(crate) is_building: bool,
  pub(crate) build_token: u64,
}

impl Default for WorkspaceStore {
  fn default() -> Self {
    Self::new("default", "My Tree")
  }
}

impl WorkspaceStore {
  /// A fresh workspace: only the root node, default viewport, root selected
  /// and a welcome message in the chat.
  pub fn new(tree_id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      meta: TreeMeta::new(tree_id, name),
      nodes: vec![TreeNode::default_root()],
      edges: Vec::new(),
      viewport: Viewport::default(),
      selected_node_id: Some(ROOT_ID.to_string()),
      chat: vec![ChatMessage::welcome()],
      chat_scope: ChatScope::Workspace,
      daily_uses: DailyUses::default(),
      pending_connection: None,
      is_building: false,
      build_token: 0,
    }
  }

  pub fn with_daily_limit(mut self, limit: u32) -> Self {
    self.daily_uses.limit = limit;
    self.daily_uses.used = self.daily_uses.used.min(limit);
    self
  }

  /// Wraps the store for sharing with a progressive build.
  pub fn into_shared(self) -> SharedStore {
    Arc::new(Mutex::new(self))
  }

  pub fn meta(&self) -> &TreeMeta {
    &self.meta
  }

  pub fn tree_id(&self) -> &str {
    &self.meta.tree_id
  }

  pub fn nodes(&self) -> &[TreeNode] {
    &self.nodes
  }

  pub fn edges(&self) -> &[TreeEdge] {
    &self.edges
  }

  pub fn node(&self, id: &str) -> Option<&TreeNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  pub fn edge(&self, id: &str) -> Option<&TreeEdge> {
    self.edges.iter().find(|e| e.id == id)
  }

  pub fn viewport(&self) -> Viewport {
    self.viewport
  }

  pub fn selected_node_id(&self) -> Option<&str> {
    self.selected_node_id.as_deref()
  }

  pub fn selected_node(&self) -> Option<&TreeNode> {
    self.selected_node_id.as_deref().and_then(|id| self.node(id))
  }

  pub fn pending_connection(&self) -> Option<&PendingConnection> {
    self.pending_connection.as_ref()
  }

  pub fn is_building(&self) -> bool {
    self.is_building
  }

  /// Current generation token; every build start or cancel increments it.
  pub fn build_token(&self) -> u64 {
    self.build_token
  }

  pub fn set_nodes(&mut self, nodes: Vec<TreeNode>) {
    self.nodes = nodes;
    self.refresh_handles();
    self.touch();
  }

  pub fn set_edges(&mut self, edges: Vec<TreeEdge>) {
    self.edges = edges;
    self.refresh_handles();
    self.touch();
  }

  pub fn add_node(&mut self, node: TreeNode) {
    self.nodes.push(node);
    self.refresh_handles();
    self.touch();
  }

  pub fn add_edge(&mut self, edge: TreeEdge) {
    self.edges.push(edge);
    self.refresh_handles();
    self.touch();
  }

  /// Selection is a plain pointer; an id that is not (yet) a node is kept as is.
  pub fn select_node(&mut self, id: Option<&str>) {
    self.selected_node_id = id.map(str::to_string);
  }

  pub fn set_viewport(&mut self, viewport: Viewport) {
    self.viewport = viewport;
  }

  pub fn set_pending_connection(&mut self, connection: Option<PendingConnection>) {
    self.pending_connection = connection;
  }

  /// Invalidates any in-flight build; it halts at its next checkpoint.
  pub fn cancel_build(&mut self) {
    self.build_token += 1;
    self.is_building = false;
  }

  /// Copies the live graph and viewport into `slot`.
  pub fn write_back(&self, slot: &mut Workspace) {
    slot.nodes = self.nodes.clone();
    slot.edges = self.edges.clone();
    slot.viewport = self.viewport;
    slot.updated_at = self.meta.updated_at;
  }

  pub(crate) fn refresh_handles(&mut self) {
    self.edges = with_auto_handles(&self.nodes, std::mem::take(&mut self.edges));
  }

  pub(crate) fn touch(&mut self) {
    self.meta.touch();
  }
}
