//! Tests for snapshot export and import files.

use chrono::{TimeZone, Utc};

use super::{export_file_name, export_snapshot, read_snapshot_file};
use crate::error::PersistError;
use crate::types::{PersistedSnapshot, SCHEMA_VERSION, TreeNode};

fn snapshot() -> PersistedSnapshot {
  PersistedSnapshot {
    schema_version: SCHEMA_VERSION,
    tree_id: "space:education".to_string(),
    updated_at: "2026-05-05T08:00:00Z".to_string(),
    nodes: vec![TreeNode::default_root()],
    edges: vec![],
    viewport: Default::default(),
    ui: Default::default(),
  }
}

#[test]
fn file_name_is_deterministic_and_portable() {
  let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
  assert_eq!(
    export_file_name("space:education", at),
    "treeflow-space_education-1700000000123.json"
  );
}

#[test]
fn export_then_read_roundtrips() {
  let dir = tempfile::tempdir().unwrap();
  let path = export_snapshot(&dir.path().join("out"), &snapshot()).unwrap();
  assert!(path.exists());
  let name = path.file_name().unwrap().to_str().unwrap();
  assert!(name.starts_with("treeflow-space_education-"));
  assert_eq!(read_snapshot_file(&path).unwrap(), snapshot());
}

#[test]
fn read_rejects_bad_files() {
  let dir = tempfile::tempdir().unwrap();
  let garbage = dir.path().join("garbage.json");
  std::fs::write(&garbage, "not json at all").unwrap();
  assert!(matches!(
    read_snapshot_file(&garbage),
    Err(PersistError::InvalidJson(_))
  ));

  let wrong = dir.path().join("wrong.json");
  std::fs::write(&wrong, r#"{"nodes": []}"#).unwrap();
  assert!(matches!(
    read_snapshot_file(&wrong),
    Err(PersistError::InvalidFormat(_))
  ));

  assert!(matches!(
    read_snapshot_file(&dir.path().join("missing.json")),
    Err(PersistError::Io(_))
  ));
}
