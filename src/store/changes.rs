//! Incremental node and edge deltas coming from an interactive editor.

use tracing::{debug, instrument};

use super::WorkspaceStore;
use crate::types::{Dimensions, Position, ROOT_ID, TreeEdge, TreeNode};

/// One incremental edit to the node list.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
  /// Node moved; `None` while a drag reports no coordinates.
  Position { id: String, position: Option<Position> },
  Dimensions { id: String, dimensions: Dimensions },
  Select { id: String, selected: bool },
  /// Removes a single node and its incident edges. Ignored for the root.
  Remove { id: String },
  Add(TreeNode),
}

/// One incremental edit to the edge list.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
  Select { id: String, selected: bool },
  Remove { id: String },
  Add(TreeEdge),
}

impl WorkspaceStore {
  /// Applies a batch of node deltas in order, then re-derives edge handles.
  #[instrument(level = "trace", skip_all, fields(changes = changes.len()))]
  pub fn on_nodes_change(&mut self, changes: Vec<NodeChange>) {
    for change in changes {
      match change {
        NodeChange::Position { id, position } => {
          if let (Some(node), Some(pos)) = (self.node_mut(&id), position) {
            node.position = pos;
          }
        }
        NodeChange::Dimensions { id, dimensions } => {
          if let Some(node) = self.node_mut(&id) {
            node.dimensions = Some(dimensions);
          }
        }
        NodeChange::Select { id, selected } => {
          if let Some(node) = self.node_mut(&id) {
            node.selected = selected;
          }
        }
        NodeChange::Remove { id } => self.remove_single_node(&id),
        NodeChange::Add(node) => self.nodes.push(node),
      }
    }
    self.refresh_handles();
    self.touch();
  }

  /// Applies a batch of edge deltas in order, then re-derives edge handles.
  #[instrument(level = "trace", skip_all, fields(changes = changes.len()))]
  pub fn on_edges_change(&mut self, changes: Vec<EdgeChange>) {
    for change in changes {
      match change {
        EdgeChange::Select { id, selected } => {
          if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
            edge.selected = selected;
          }
        }
        EdgeChange::Remove { id } => self.edges.retain(|e| e.id != id),
        EdgeChange::Add(edge) => self.edges.push(edge),
      }
    }
    self.refresh_handles();
    self.touch();
  }

  fn node_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
    self.nodes.iter_mut().find(|n| n.id == id)
  }

  fn remove_single_node(&mut self, id: &str) {
    if id == ROOT_ID {
      debug!("on_nodes_change: root is protected");
      return;
    }
    self.nodes.retain(|n| n.id != id);
    self.edges.retain(|e| !e.touches(id));
    if self.selected_node_id.as_deref() == Some(id) {
      self.selected_node_id = Some(ROOT_ID.to_string());
    }
  }
}
