//! Tests for `TreeNode` and `NodeData`.

use serde_json::json;

use super::{NodeData, NodeDataPatch, NodeKind, Position, ROOT_ID, TreeNode};

#[test]
fn default_root_is_protected_process_node() {
  let root = TreeNode::default_root();
  assert_eq!(root.id, ROOT_ID);
  assert!(root.is_root());
  assert_eq!(root.kind, NodeKind::Process);
  assert_eq!(root.position, Position::ORIGIN);
  assert_eq!(root.data.title, "Start here");
  assert_eq!(root.data.color, "slate");
}

#[test]
fn patch_merges_only_given_fields() {
  let mut data = NodeData::titled("a");
  data.description = "keep me".to_string();
  data.apply(NodeDataPatch::default().title("b").completed(true));
  assert_eq!(data.title, "b");
  assert!(data.completed);
  assert_eq!(data.description, "keep me");
  assert_eq!(data.color, "slate");
}

#[test]
fn patch_extends_opaque_fields() {
  let mut data = NodeData::titled("a");
  data.extra.insert("groupId".to_string(), json!("g1"));
  let mut patch = NodeDataPatch::default();
  patch.extra.insert("appear".to_string(), json!(true));
  data.apply(patch);
  assert_eq!(data.extra.get("groupId"), Some(&json!("g1")));
  assert_eq!(data.extra.get("appear"), Some(&json!(true)));
}

#[test]
fn deserializes_with_defaults_and_unknown_keys() {
  let node: TreeNode = serde_json::from_value(json!({
    "id": "n1",
    "position": { "x": 1.0, "y": 2.0 },
    "data": { "title": "Hello", "nodeType": "process" }
  }))
  .unwrap();
  assert_eq!(node.kind, NodeKind::Process);
  assert_eq!(node.data.title, "Hello");
  assert!(!node.data.completed);
  assert_eq!(node.data.extra.get("nodeType"), Some(&json!("process")));
  assert!(!node.selected);
}

#[test]
fn kind_serializes_as_type() {
  let node = TreeNode::new("d", NodeKind::Decision, Position::new(0.0, 0.0), NodeData::titled("x"));
  let v = serde_json::to_value(&node).unwrap();
  assert_eq!(v["type"], "decision");
  assert!(v.get("selected").is_none());
}
