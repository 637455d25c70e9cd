//! Structural edits of the live graph.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::WorkspaceStore;
use crate::graph::{
  CHILD_OFFSET_X, SIBLING_SPACING_Y, collect_subtree_ids, column_start_y, layout_children_simple,
  parent_map, pick_handles, styled_edge,
};
use crate::ids::{edge_id, new_node_id};
use crate::types::{
  ConnectionType, HandlePair, NodeData, NodeDataPatch, NodeKind, Position, ROOT_ID, TreeNode,
};

/// Offset of a single new child from its parent.
pub const CHILD_NODE_OFFSET: (f64, f64) = (240.0, 120.0);
/// Horizontal offset of a sibling created next to a node without a parent.
pub const DETACHED_SIBLING_OFFSET_X: f64 = 260.0;
/// Vertical offset of a sibling created below a node that has a parent.
pub const SIBLING_OFFSET_Y: f64 = 120.0;
/// Offset of every node of a duplicated subtree from its original.
pub const DUPLICATE_OFFSET: (f64, f64) = (320.0, 40.0);
/// Largest batch accepted by [WorkspaceStore::add_multiple_children].
pub const MAX_BATCH_CHILDREN: usize = 10;

const NEW_STEP_TITLE: &str = "New step";
const COPY_SUFFIX: &str = " (copy)";

fn step_node(position: Position, title: impl Into<String>) -> TreeNode {
  TreeNode::new(new_node_id(), NodeKind::Process, position, NodeData::titled(title))
}

impl WorkspaceStore {
  /// Adds one child below and right of `parent_id` and selects it.
  #[instrument(level = "trace", skip(self))]
  pub fn add_child_node(&mut self, parent_id: &str) -> Option<String> {
    let Some(parent) = self.node(parent_id).cloned() else {
      debug!(parent_id, "add_child_node: unknown parent");
      return None;
    };
    let (dx, dy) = CHILD_NODE_OFFSET;
    let child = step_node(parent.position.offset(dx, dy), NEW_STEP_TITLE);
    let edge = styled_edge(&parent, &child, ConnectionType::Child, None);
    let child_id = child.id.clone();
    self.nodes.push(child);
    self.edges.push(edge);
    self.refresh_handles();
    self.selected_node_id = Some(child_id.clone());
    self.touch();
    Some(child_id)
  }

  /// Adds `count` children titled `Step 1..=count` in a column centred on the
  /// parent and selects the first. `count` must be within `1..=10`.
  #[instrument(level = "trace", skip(self))]
  pub fn add_multiple_children(&mut self, parent_id: &str, count: usize) -> Vec<String> {
    if !(1..=MAX_BATCH_CHILDREN).contains(&count) {
      debug!(parent_id, count, "add_multiple_children: count out of range");
      return Vec::new();
    }
    let Some(parent) = self.node(parent_id).cloned() else {
      debug!(parent_id, "add_multiple_children: unknown parent");
      return Vec::new();
    };
    let start_y = column_start_y(parent.position.y, count);
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
      let pos = Position::new(
        parent.position.x + CHILD_OFFSET_X,
        start_y + i as f64 * SIBLING_SPACING_Y,
      );
      let child = step_node(pos, format!("Step {}", i + 1));
      self
        .edges
        .push(styled_edge(&parent, &child, ConnectionType::Child, None));
      ids.push(child.id.clone());
      self.nodes.push(child);
    }
    self.refresh_handles();
    self.selected_node_id = ids.first().cloned();
    self.touch();
    ids
  }

  /// Adds an unattached node of `kind` at `position`, titled after its kind, and selects it.
  pub fn add_node_at_position(&mut self, position: Position, kind: NodeKind) -> String {
    let node = TreeNode::new(
      new_node_id(),
      kind,
      position,
      NodeData::titled(kind.default_title()),
    );
    let id = node.id.clone();
    self.nodes.push(node);
    self.selected_node_id = Some(id.clone());
    self.touch();
    id
  }

  /// Adds a sibling of `node_id`.
  ///
  /// With a parent, the sibling is a new child of that parent placed below
  /// `node_id`; without one it is an unattached node to the right.
  #[instrument(level = "trace", skip(self))]
  pub fn add_sibling_node(&mut self, node_id: &str) -> Option<String> {
    let Some(base) = self.node(node_id).cloned() else {
      debug!(node_id, "add_sibling_node: unknown node");
      return None;
    };
    let parent_id = parent_map(&self.edges).get(node_id).map(|p| p.to_string());
    let Some(parent_id) = parent_id else {
      let sibling = step_node(
        base.position.offset(DETACHED_SIBLING_OFFSET_X, 0.0),
        NEW_STEP_TITLE,
      );
      let id = sibling.id.clone();
      self.nodes.push(sibling);
      self.selected_node_id = Some(id.clone());
      self.touch();
      return Some(id);
    };
    let Some(parent) = self.node(&parent_id).cloned() else {
      debug!(node_id, parent_id, "add_sibling_node: parent edge is dangling");
      return None;
    };
    let sibling = step_node(base.position.offset(0.0, SIBLING_OFFSET_Y), NEW_STEP_TITLE);
    let edge = styled_edge(&parent, &sibling, ConnectionType::Child, None);
    let id = sibling.id.clone();
    self.nodes.push(sibling);
    self.edges.push(edge);
    self.refresh_handles();
    self.selected_node_id = Some(id.clone());
    self.touch();
    Some(id)
  }

  /// Deletes `node_id` with its whole subtree and every incident edge.
  ///
  /// The root is never deleted. A selection inside the removed subtree falls
  /// back to the root. Returns whether anything was removed.
  #[instrument(level = "trace", skip(self))]
  pub fn delete_node(&mut self, node_id: &str) -> bool {
    if node_id == ROOT_ID {
      debug!("delete_node: root is protected");
      return false;
    }
    let doomed = collect_subtree_ids(node_id, &self.edges);
    let (nodes_before, edges_before) = (self.nodes.len(), self.edges.len());
    self.nodes.retain(|n| !doomed.contains(&n.id));
    self
      .edges
      .retain(|e| !doomed.contains(&e.source) && !doomed.contains(&e.target));
    if self.nodes.len() == nodes_before && self.edges.len() == edges_before {
      debug!(node_id, "delete_node: nothing to delete");
      return false;
    }
    if self
      .selected_node_id
      .as_ref()
      .is_some_and(|s| doomed.contains(s))
    {
      self.selected_node_id = Some(ROOT_ID.to_string());
    }
    self.refresh_handles();
    self.touch();
    true
  }

  /// Copies the subtree of `node_id` with fresh ids, offset from the original.
  ///
  /// The copied root gets a " (copy)" title suffix and, when the original had
  /// a parent, a child edge from that parent. Internal edges are remapped with
  /// recomputed handles. Selects and returns the copied root.
  #[instrument(level = "trace", skip(self))]
  pub fn duplicate_subtree(&mut self, node_id: &str) -> Option<String> {
    if self.node(node_id).is_none() {
      debug!(node_id, "duplicate_subtree: unknown node");
      return None;
    }
    let parent_id = parent_map(&self.edges).get(node_id).map(|p| p.to_string());
    let subtree = collect_subtree_ids(node_id, &self.edges);
    let (dx, dy) = DUPLICATE_OFFSET;

    let mut remap: HashMap<String, String> = HashMap::new();
    let mut copies: Vec<TreeNode> = Vec::new();
    for original in self.nodes.iter().filter(|n| subtree.contains(&n.id)) {
      let mut copy = original.clone();
      copy.id = new_node_id();
      copy.position = original.position.offset(dx, dy);
      copy.selected = false;
      if original.id == node_id {
        copy.data.title.push_str(COPY_SUFFIX);
      }
      remap.insert(original.id.clone(), copy.id.clone());
      copies.push(copy);
    }
    let position_of: HashMap<&str, Position> =
      copies.iter().map(|n| (n.id.as_str(), n.position)).collect();

    let mut new_edges = Vec::new();
    for e in &self.edges {
      let (Some(source), Some(target)) = (remap.get(&e.source), remap.get(&e.target)) else {
        continue;
      };
      let mut copy = e.clone();
      copy.id = edge_id(source, target);
      copy.source = source.clone();
      copy.target = target.clone();
      copy.manual_handles = false;
      copy.selected = false;
      if let (Some(s), Some(t)) = (position_of.get(source.as_str()), position_of.get(target.as_str())) {
        copy.set_handles(pick_handles(*s, *t));
      }
      new_edges.push(copy);
    }

    let copy_root_id = remap.get(node_id)?.clone();
    if let Some(parent) = parent_id.as_deref().and_then(|p| self.node(p)) {
      if let Some(copy_root) = copies.iter().find(|n| n.id == copy_root_id) {
        new_edges.push(styled_edge(parent, copy_root, ConnectionType::Child, None));
      }
    }

    self.nodes.extend(copies);
    self.edges.extend(new_edges);
    self.refresh_handles();
    self.selected_node_id = Some(copy_root_id.clone());
    self.touch();
    Some(copy_root_id)
  }

  /// Connects `source` to `target` with a typed, styled edge.
  ///
  /// Refused when an edge with the same `(source, target)` pair exists or an
  /// endpoint is unknown. The label defaults to the type name for non-child
  /// types. Always clears the pending connection.
  #[instrument(level = "trace", skip(self))]
  pub fn create_connection(
    &mut self,
    source: &str,
    target: &str,
    kind: ConnectionType,
    label: Option<&str>,
  ) -> Option<String> {
    self.pending_connection = None;
    if self
      .edges
      .iter()
      .any(|e| e.source == source && e.target == target)
    {
      debug!(source, target, "create_connection: pair already connected");
      return None;
    }
    let (Some(s), Some(t)) = (self.node(source), self.node(target)) else {
      debug!(source, target, "create_connection: unknown endpoint");
      return None;
    };
    let label = match label.filter(|l| !l.is_empty()) {
      Some(l) => Some(l.to_string()),
      None if kind != ConnectionType::Child => Some(kind.as_str().to_string()),
      None => None,
    };
    let edge = styled_edge(s, t, kind, label);
    let id = edge.id.clone();
    self.edges.push(edge);
    self.refresh_handles();
    self.touch();
    Some(id)
  }

  /// Replaces the label of `edge_id`; an empty label removes it.
  pub fn update_edge_label(&mut self, edge_id: &str, label: &str) -> bool {
    let Some(edge) = self.edges.iter_mut().find(|e| e.id == edge_id) else {
      debug!(edge_id, "update_edge_label: unknown edge");
      return false;
    };
    edge.label = (!label.is_empty()).then(|| label.to_string());
    self.touch();
    true
  }

  pub fn delete_edge(&mut self, edge_id: &str) -> bool {
    let before = self.edges.len();
    self.edges.retain(|e| e.id != edge_id);
    if self.edges.len() == before {
      debug!(edge_id, "delete_edge: unknown edge");
      return false;
    }
    self.touch();
    true
  }

  /// Pins the handles of `edge_id`; automatic recomputation skips it from now on.
  pub fn set_edge_handles(&mut self, edge_id: &str, handles: HandlePair) -> bool {
    let Some(edge) = self.edges.iter_mut().find(|e| e.id == edge_id) else {
      debug!(edge_id, "set_edge_handles: unknown edge");
      return false;
    };
    edge.set_handles(handles);
    edge.manual_handles = true;
    self.touch();
    true
  }

  /// Returns `edge_id` to automatic handle placement.
  pub fn release_edge_handles(&mut self, edge_id: &str) -> bool {
    let Some(edge) = self.edges.iter_mut().find(|e| e.id == edge_id) else {
      return false;
    };
    edge.manual_handles = false;
    self.refresh_handles();
    self.touch();
    true
  }

  /// Shallow-merges `patch` into the data of node `id`.
  pub fn update_node_data(&mut self, id: &str, patch: NodeDataPatch) -> bool {
    let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
      debug!(id, "update_node_data: unknown node");
      return false;
    };
    node.data.apply(patch);
    self.touch();
    true
  }

  /// Re-stacks the direct children of `parent_id` in a column centred on it.
  pub fn layout_children(&mut self, parent_id: &str) -> bool {
    if !layout_children_simple(parent_id, &mut self.nodes, &self.edges) {
      debug!(parent_id, "layout_children: nothing to lay out");
      return false;
    }
    self.refresh_handles();
    self.touch();
    true
  }
}
