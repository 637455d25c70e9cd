//! Tests for `PersistedSnapshot`.

use serde_json::json;

use super::{PersistedSnapshot, SCHEMA_VERSION, TreeNode, UiState, Viewport};

#[test]
fn snapshot_uses_camel_case_keys() {
  let snap = PersistedSnapshot {
    schema_version: SCHEMA_VERSION,
    tree_id: "space:body".to_string(),
    updated_at: "2026-02-14T10:00:00Z".to_string(),
    nodes: vec![TreeNode::default_root()],
    edges: vec![],
    viewport: Viewport::default(),
    ui: UiState {
      selected_node_id: Some("root".to_string()),
    },
  };
  let v = serde_json::to_value(&snap).unwrap();
  assert_eq!(v["schemaVersion"], 1);
  assert_eq!(v["treeId"], "space:body");
  assert_eq!(v["updatedAt"], "2026-02-14T10:00:00Z");
  assert_eq!(v["ui"]["selectedNodeId"], "root");
  assert_eq!(v["viewport"], json!({ "x": 0.0, "y": 0.0, "zoom": 1.0 }));
}

#[test]
fn missing_ui_defaults_to_no_selection() {
  let snap: PersistedSnapshot = serde_json::from_value(json!({
    "schemaVersion": 1,
    "treeId": "t",
    "updatedAt": "2026-02-14T10:00:00Z",
    "nodes": [],
    "edges": [],
    "viewport": { "x": 1.0, "y": 2.0, "zoom": 0.5 }
  }))
  .unwrap();
  assert_eq!(snap.ui.selected_node_id, None);
  assert_eq!(snap.viewport.zoom, 0.5);
}
