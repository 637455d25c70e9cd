//! Tests for incremental node and edge changes.

use crate::graph::styled_edge;
use crate::store::{EdgeChange, NodeChange, WorkspaceStore};
use crate::types::{
  ConnectionType, Dimensions, NodeData, NodeKind, Position, ROOT_ID, Side, TreeNode,
};

fn two_node_store() -> WorkspaceStore {
  let root = TreeNode::default_root();
  let a = TreeNode::new("A", NodeKind::Note, Position::new(300.0, 0.0), NodeData::titled("A"));
  let edge = styled_edge(&root, &a, ConnectionType::Child, None);
  let mut store = WorkspaceStore::default();
  store.set_nodes(vec![root, a]);
  store.set_edges(vec![edge]);
  store
}

#[test]
fn moving_a_node_reorients_auto_handles() {
  let mut store = two_node_store();
  assert_eq!(store.edges()[0].source_handle, Some(Side::Right));
  store.on_nodes_change(vec![NodeChange::Position {
    id: "A".to_string(),
    position: Some(Position::new(10.0, 400.0)),
  }]);
  assert_eq!(store.node("A").unwrap().position, Position::new(10.0, 400.0));
  assert_eq!(store.edges()[0].source_handle, Some(Side::Bottom));
  assert_eq!(store.edges()[0].target_handle, Some(Side::Top));
}

#[test]
fn position_without_coordinates_keeps_node() {
  let mut store = two_node_store();
  store.on_nodes_change(vec![NodeChange::Position {
    id: "A".to_string(),
    position: None,
  }]);
  assert_eq!(store.node("A").unwrap().position, Position::new(300.0, 0.0));
}

#[test]
fn select_and_dimensions_are_recorded() {
  let mut store = two_node_store();
  store.on_nodes_change(vec![
    NodeChange::Select {
      id: "A".to_string(),
      selected: true,
    },
    NodeChange::Dimensions {
      id: "A".to_string(),
      dimensions: Dimensions {
        width: 180.0,
        height: 64.0,
      },
    },
  ]);
  let a = store.node("A").unwrap();
  assert!(a.selected);
  assert_eq!(a.dimensions.map(|d| d.width), Some(180.0));
}

#[test]
fn remove_change_spares_root_and_drops_incident_edges() {
  let mut store = two_node_store();
  store.select_node(Some("A"));
  store.on_nodes_change(vec![
    NodeChange::Remove {
      id: ROOT_ID.to_string(),
    },
    NodeChange::Remove {
      id: "A".to_string(),
    },
  ]);
  assert_eq!(store.nodes().len(), 1);
  assert!(store.node(ROOT_ID).is_some());
  assert!(store.edges().is_empty());
  assert_eq!(store.selected_node_id(), Some(ROOT_ID));
}

#[test]
fn added_edges_receive_handles() {
  let mut store = two_node_store();
  let root = store.node(ROOT_ID).unwrap().clone();
  let a = store.node("A").unwrap().clone();
  let mut edge = styled_edge(&a, &root, ConnectionType::Reference, None);
  edge.source_handle = None;
  edge.target_handle = None;
  let id = edge.id.clone();
  store.on_edges_change(vec![EdgeChange::Add(edge)]);
  assert_eq!(store.edge(&id).unwrap().source_handle, Some(Side::Left));

  store.on_edges_change(vec![
    EdgeChange::Select {
      id: id.clone(),
      selected: true,
    },
  ]);
  assert!(store.edge(&id).unwrap().selected);
  store.on_edges_change(vec![EdgeChange::Remove { id: id.clone() }]);
  assert!(store.edge(&id).is_none());
}

#[test]
fn added_nodes_join_the_graph() {
  let mut store = WorkspaceStore::default();
  let n = TreeNode::new("N", NodeKind::End, Position::new(0.0, -200.0), NodeData::titled("N"));
  store.on_nodes_change(vec![NodeChange::Add(n)]);
  assert_eq!(store.nodes().len(), 2);
}
