//! Tests for snapshot validation and migration.

use serde_json::json;

use super::{migrate_snapshot, parse_snapshot, validate_snapshot};
use crate::error::PersistError;
use crate::types::{PersistedSnapshot, SCHEMA_VERSION, TreeNode};

fn valid_value() -> serde_json::Value {
  json!({
    "schemaVersion": 1,
    "treeId": "space:body",
    "updatedAt": "2026-01-01T00:00:00Z",
    "nodes": [],
    "edges": [],
    "viewport": { "x": 0, "y": 0, "zoom": 1 }
  })
}

#[test]
fn accepts_minimal_snapshot() {
  assert!(validate_snapshot(&valid_value()));
}

#[test]
fn rejects_non_objects() {
  assert!(!validate_snapshot(&json!(null)));
  assert!(!validate_snapshot(&json!([1, 2])));
  assert!(!validate_snapshot(&json!("snapshot")));
}

#[test]
fn rejects_each_missing_or_mistyped_field() {
  for (field, bad) in [
    ("schemaVersion", json!("1")),
    ("treeId", json!(7)),
    ("updatedAt", json!(null)),
    ("nodes", json!({})),
    ("edges", json!("none")),
    ("viewport", json!([0, 0, 1])),
  ] {
    let mut v = valid_value();
    v[field] = bad;
    assert!(!validate_snapshot(&v), "{field} should be rejected");
  }
  let mut v = valid_value();
  v["viewport"]["zoom"] = json!("1");
  assert!(!validate_snapshot(&v));
}

#[test]
fn migrate_passes_current_version_and_rejects_others() {
  let snap = PersistedSnapshot {
    schema_version: SCHEMA_VERSION,
    tree_id: "t".to_string(),
    updated_at: String::new(),
    nodes: vec![TreeNode::default_root()],
    edges: vec![],
    viewport: Default::default(),
    ui: Default::default(),
  };
  assert_eq!(migrate_snapshot(snap.clone()), Some(snap.clone()));
  let future = PersistedSnapshot {
    schema_version: 2,
    ..snap
  };
  assert_eq!(migrate_snapshot(future), None);
}

#[test]
fn parse_distinguishes_json_and_format_errors() {
  assert!(matches!(
    parse_snapshot(b"{not json"),
    Err(PersistError::InvalidJson(_))
  ));
  assert!(matches!(
    parse_snapshot(br#"{"hello": "world"}"#),
    Err(PersistError::InvalidFormat(_))
  ));
  let mut v = valid_value();
  v["schemaVersion"] = json!(9);
  assert!(matches!(
    parse_snapshot(v.to_string().as_bytes()),
    Err(PersistError::InvalidFormat(_))
  ));
}

#[test]
fn parse_accepts_valid_bytes() {
  let snap = parse_snapshot(valid_value().to_string().as_bytes()).unwrap();
  assert_eq!(snap.tree_id, "space:body");
  assert_eq!(snap.ui.selected_node_id, None);
}
