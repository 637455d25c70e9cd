//! Tests for structural edits.

use std::collections::HashSet;

use crate::graph::{CHILD_OFFSET_X, collect_subtree_ids, styled_edge};
use crate::store::{PendingConnection, WorkspaceStore};
use crate::types::{
  ConnectionType, HandlePair, NodeData, NodeDataPatch, NodeKind, Position, ROOT_ID, Side, TreeNode,
};

fn node(id: &str, x: f64, y: f64) -> TreeNode {
  TreeNode::new(id, NodeKind::Process, Position::new(x, y), NodeData::titled(id))
}

/// root -> A -> B, plus a detached node C.
fn chain_store() -> WorkspaceStore {
  let root = TreeNode::default_root();
  let a = node("A", 280.0, 0.0);
  let b = node("B", 560.0, 0.0);
  let c = node("C", 0.0, 400.0);
  let edges = vec![
    styled_edge(&root, &a, ConnectionType::Child, None),
    styled_edge(&a, &b, ConnectionType::Child, None),
  ];
  let mut store = WorkspaceStore::default();
  store.set_nodes(vec![root, a, b, c]);
  store.set_edges(edges);
  store
}

fn ids(store: &WorkspaceStore) -> Vec<&str> {
  store.nodes().iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn add_child_node_offsets_connects_and_selects() {
  let mut store = WorkspaceStore::default();
  let id = store.add_child_node(ROOT_ID).unwrap();
  let child = store.node(&id).unwrap();
  assert_eq!(child.position, Position::new(240.0, 120.0));
  assert_eq!(child.data.title, "New step");
  assert_eq!(store.selected_node_id(), Some(id.as_str()));
  let edge = &store.edges()[0];
  assert_eq!((edge.source.as_str(), edge.target.as_str()), (ROOT_ID, id.as_str()));
  assert_eq!(edge.connection_type, ConnectionType::Child);
  assert_eq!(edge.label, None);
  assert_eq!(
    edge.handles(),
    Some(HandlePair {
      source: Side::Right,
      target: Side::Left
    })
  );
}

#[test]
fn add_child_node_unknown_parent_is_noop() {
  let mut store = WorkspaceStore::default();
  assert_eq!(store.add_child_node("ghost"), None);
  assert_eq!(store.nodes().len(), 1);
  assert_eq!(store.selected_node_id(), Some(ROOT_ID));
}

#[test]
fn add_multiple_children_centres_titled_steps() {
  let mut store = WorkspaceStore::default();
  let ids = store.add_multiple_children(ROOT_ID, 3);
  assert_eq!(ids.len(), 3);
  let ys: Vec<f64> = ids.iter().map(|id| store.node(id).unwrap().position.y).collect();
  assert_eq!(ys, vec![-120.0, 0.0, 120.0]);
  for (i, id) in ids.iter().enumerate() {
    let n = store.node(id).unwrap();
    assert_eq!(n.data.title, format!("Step {}", i + 1));
    assert_eq!(n.position.x, CHILD_OFFSET_X);
    assert!(store.edges().iter().any(|e| e.source == ROOT_ID
      && &e.target == id
      && e.connection_type == ConnectionType::Child));
  }
  assert_eq!(store.selected_node_id(), Some(ids[0].as_str()));
}

#[test]
fn add_multiple_children_rejects_out_of_range_counts() {
  let mut store = WorkspaceStore::default();
  assert!(store.add_multiple_children(ROOT_ID, 0).is_empty());
  assert!(store.add_multiple_children(ROOT_ID, 11).is_empty());
  assert_eq!(store.nodes().len(), 1);
  assert_eq!(store.add_multiple_children(ROOT_ID, 10).len(), 10);
}

#[test]
fn add_node_at_position_uses_kind_title() {
  let mut store = WorkspaceStore::default();
  let id = store.add_node_at_position(Position::new(50.0, 60.0), NodeKind::Decision);
  let n = store.node(&id).unwrap();
  assert_eq!(n.kind, NodeKind::Decision);
  assert_eq!(n.data.title, "Decision point");
  assert_eq!(n.position, Position::new(50.0, 60.0));
  assert!(store.edges().is_empty());
  assert_eq!(store.selected_node_id(), Some(id.as_str()));
}

#[test]
fn add_sibling_of_attached_node_shares_parent() {
  let mut store = chain_store();
  let id = store.add_sibling_node("B").unwrap();
  let sibling = store.node(&id).unwrap();
  assert_eq!(sibling.position, Position::new(560.0, 120.0));
  assert!(store.edges().iter().any(|e| e.source == "A" && e.target == id));
}

#[test]
fn add_sibling_of_detached_node_stays_detached() {
  let mut store = chain_store();
  let edges_before = store.edges().len();
  let id = store.add_sibling_node("C").unwrap();
  assert_eq!(store.node(&id).unwrap().position, Position::new(260.0, 400.0));
  assert_eq!(store.edges().len(), edges_before);
}

#[test]
fn delete_root_is_noop() {
  let mut store = chain_store();
  let (nodes, edges) = (store.nodes().to_vec(), store.edges().to_vec());
  assert!(!store.delete_node(ROOT_ID));
  assert_eq!(store.nodes(), nodes.as_slice());
  assert_eq!(store.edges(), edges.as_slice());
}

#[test]
fn delete_cascades_through_subtree() {
  let mut store = chain_store();
  store.select_node(Some("B"));
  assert!(store.delete_node("A"));
  assert_eq!(ids(&store), vec![ROOT_ID, "C"]);
  assert!(store.edges().is_empty());
  assert_eq!(store.selected_node_id(), Some(ROOT_ID));
}

#[test]
fn delete_leaves_no_dangling_edges() {
  let mut store = chain_store();
  store.create_connection("C", "B", ConnectionType::Reference, None);
  store.create_connection("A", "C", ConnectionType::Dependency, None);
  store.delete_node("B");
  let remaining: HashSet<&str> = ids(&store).into_iter().collect();
  for e in store.edges() {
    assert!(remaining.contains(e.source.as_str()));
    assert!(remaining.contains(e.target.as_str()));
  }
  assert_eq!(store.edges().len(), 2);
}

#[test]
fn delete_terminates_on_cycles() {
  let mut store = chain_store();
  store.create_connection("B", "A", ConnectionType::Branch, None);
  assert!(store.delete_node("A"));
  assert_eq!(ids(&store), vec![ROOT_ID, "C"]);
}

#[test]
fn duplicate_copies_subtree_and_parent_edge() {
  let mut store = chain_store();
  let nodes_before = store.nodes().len();
  let edges_before = store.edges().len();
  let copy_root = store.duplicate_subtree("A").unwrap();

  assert_eq!(store.nodes().len(), nodes_before + 2);
  assert_eq!(store.edges().len(), edges_before + 2);
  let copy = store.node(&copy_root).unwrap();
  assert_eq!(copy.data.title, "A (copy)");
  assert_eq!(copy.position, Position::new(600.0, 40.0));
  assert_eq!(store.selected_node_id(), Some(copy_root.as_str()));

  let from_parent: Vec<_> = store
    .edges()
    .iter()
    .filter(|e| e.source == ROOT_ID && e.target == copy_root)
    .collect();
  assert_eq!(from_parent.len(), 1);

  let copied_subtree = collect_subtree_ids(&copy_root, store.edges());
  assert_eq!(copied_subtree.len(), 2);
  let copied_child = copied_subtree.iter().find(|id| **id != copy_root).unwrap();
  let child = store.node(copied_child).unwrap();
  assert_eq!(child.data.title, "B");
  assert_ne!(child.id, "B");
}

#[test]
fn duplicate_detached_node_adds_no_parent_edge() {
  let mut store = chain_store();
  let edges_before = store.edges().len();
  let copy = store.duplicate_subtree("C").unwrap();
  assert_eq!(store.edges().len(), edges_before);
  assert_eq!(store.node(&copy).unwrap().data.title, "C (copy)");
}

#[test]
fn duplicate_recomputes_pinned_handles() {
  let mut store = chain_store();
  let ab = store.edges().iter().find(|e| e.source == "A").unwrap().id.clone();
  store.set_edge_handles(
    &ab,
    HandlePair {
      source: Side::Top,
      target: Side::Top,
    },
  );
  let copy_root = store.duplicate_subtree("A").unwrap();
  let copied = store.edges().iter().find(|e| e.source == copy_root).unwrap();
  assert!(!copied.manual_handles);
  assert_eq!(copied.source_handle, Some(Side::Right));
}

#[test]
fn create_connection_rejects_duplicate_pair() {
  let mut store = chain_store();
  assert!(store
    .create_connection("C", "B", ConnectionType::Dependency, None)
    .is_some());
  assert!(store
    .create_connection("C", "B", ConnectionType::Reference, Some("again"))
    .is_none());
  let between = store
    .edges()
    .iter()
    .filter(|e| e.source == "C" && e.target == "B")
    .count();
  assert_eq!(between, 1);
}

#[test]
fn create_connection_styles_by_type() {
  let mut store = chain_store();
  store.set_pending_connection(Some(PendingConnection {
    source: "C".to_string(),
    target: "A".to_string(),
  }));
  let id = store
    .create_connection("C", "A", ConnectionType::Prerequisite, Some(""))
    .unwrap();
  let e = store.edge(&id).unwrap();
  assert!(e.animated);
  assert_eq!(e.style.stroke, "#ef4444");
  assert_eq!(e.style.stroke_width, 2.0);
  assert_eq!(e.label.as_deref(), Some("prerequisite"));
  assert_eq!(store.pending_connection(), None);

  let child = store
    .create_connection("C", "B", ConnectionType::Child, None)
    .unwrap();
  assert_eq!(store.edge(&child).unwrap().label, None);
  assert!(!store.edge(&child).unwrap().animated);
}

#[test]
fn create_connection_unknown_endpoint_is_noop() {
  let mut store = chain_store();
  let before = store.edges().len();
  assert!(store
    .create_connection("C", "ghost", ConnectionType::Branch, None)
    .is_none());
  assert_eq!(store.edges().len(), before);
}

#[test]
fn edge_label_and_delete() {
  let mut store = chain_store();
  let id = store.edges()[0].id.clone();
  assert!(store.update_edge_label(&id, "first"));
  assert_eq!(store.edge(&id).unwrap().label.as_deref(), Some("first"));
  assert!(store.update_edge_label(&id, ""));
  assert_eq!(store.edge(&id).unwrap().label, None);
  assert!(!store.update_edge_label("ghost", "x"));
  assert!(store.delete_edge(&id));
  assert!(!store.delete_edge(&id));
}

#[test]
fn pinned_handles_survive_moves_until_released() {
  let mut store = chain_store();
  let id = store.edges()[0].id.clone();
  let pinned = HandlePair {
    source: Side::Bottom,
    target: Side::Bottom,
  };
  assert!(store.set_edge_handles(&id, pinned));
  store.layout_children(ROOT_ID);
  assert_eq!(store.edge(&id).unwrap().handles(), Some(pinned));
  assert!(store.release_edge_handles(&id));
  assert_eq!(store.edge(&id).unwrap().source_handle, Some(Side::Right));
}

#[test]
fn update_node_data_merges_patch() {
  let mut store = chain_store();
  assert!(store.update_node_data("A", NodeDataPatch::default().completed(true).color("#ff0000")));
  let a = store.node("A").unwrap();
  assert!(a.data.completed);
  assert_eq!(a.data.color, "#ff0000");
  assert_eq!(a.data.title, "A");
  assert!(!store.update_node_data("ghost", NodeDataPatch::default().title("x")));
}

#[test]
fn layout_children_stacks_direct_children_only() {
  let mut store = WorkspaceStore::default();
  let kids = store.add_multiple_children(ROOT_ID, 2);
  let grandchild = store.add_child_node(&kids[0]).unwrap();
  let gc_before = store.node(&grandchild).unwrap().position;
  store.on_nodes_change(vec![crate::store::NodeChange::Position {
    id: kids[1].clone(),
    position: Some(Position::new(-900.0, 900.0)),
  }]);
  assert!(store.layout_children(ROOT_ID));
  assert_eq!(store.node(&kids[1]).unwrap().position, Position::new(280.0, 60.0));
  assert_eq!(store.node(&grandchild).unwrap().position, gc_before);
  assert!(!store.layout_children(&grandchild));
}
