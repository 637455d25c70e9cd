//! Tests for snapshot, hydrate and storage glue.

use crate::error::PersistError;
use crate::persistence::{MemoryStorage, PersistenceAdapter};
use crate::store::WorkspaceStore;
use crate::types::{ConnectionType, ROOT_ID, Viewport, Workspace};

fn edited_store() -> WorkspaceStore {
  let mut store = WorkspaceStore::new("space:body", "Body");
  let kids = store.add_multiple_children(ROOT_ID, 3);
  store.add_child_node(&kids[1]);
  store.create_connection(&kids[0], &kids[2], ConnectionType::Dependency, Some("needs"));
  store.set_viewport(Viewport {
    x: -40.0,
    y: 12.5,
    zoom: 0.75,
  });
  store.select_node(Some(&kids[2]));
  store
}

#[test]
fn snapshot_hydrate_roundtrip() {
  let source = edited_store();
  let snapshot = source.persistable_snapshot();
  assert_eq!(snapshot.schema_version, 1);
  assert_eq!(snapshot.tree_id, "space:body");

  let mut target = WorkspaceStore::default();
  target.hydrate(snapshot);
  assert_eq!(target.nodes(), source.nodes());
  assert_eq!(target.edges(), source.edges());
  assert_eq!(target.viewport(), source.viewport());
  assert_eq!(target.selected_node_id(), source.selected_node_id());
  assert_eq!(target.tree_id(), "space:body");
}

#[test]
fn hydrate_cancels_running_build() {
  let mut store = WorkspaceStore::default();
  store.is_building = true;
  let token = store.build_token();
  store.hydrate(edited_store().persistable_snapshot());
  assert!(!store.is_building());
  assert!(store.build_token() > token);
}

#[test]
fn save_and_load_tree() {
  let adapter = PersistenceAdapter::in_memory();
  let source = edited_store();
  source.save_tree(&adapter, "space:body").unwrap();

  let mut target = WorkspaceStore::default();
  assert!(target.load_tree(&adapter, "space:body"));
  assert_eq!(target.nodes(), source.nodes());
  assert!(!target.load_tree(&adapter, "space:other"));
}

#[test]
fn failed_save_keeps_live_state() {
  let adapter = PersistenceAdapter::new(MemoryStorage::with_quota(10));
  let store = edited_store();
  let nodes = store.nodes().to_vec();
  assert!(matches!(
    store.save_tree(&adapter, "space:body"),
    Err(PersistError::Backend(_))
  ));
  assert_eq!(store.nodes(), nodes.as_slice());
}

#[test]
fn reset_tree_clears_storage_and_reseeds() {
  let adapter = PersistenceAdapter::in_memory();
  let mut store = edited_store();
  store.save_tree(&adapter, "space:body").unwrap();
  store.reset_tree(&adapter, "space:body").unwrap();
  assert_eq!(store.nodes().len(), 1);
  assert_eq!(store.nodes()[0].id, ROOT_ID);
  assert!(store.edges().is_empty());
  assert_eq!(store.viewport(), Viewport::default());
  assert_eq!(store.selected_node_id(), Some(ROOT_ID));
  assert!(adapter.load("space:body").is_none());
}

#[test]
fn export_then_import_saves_under_target_id() {
  let dir = tempfile::tempdir().unwrap();
  let adapter = PersistenceAdapter::in_memory();
  let source = edited_store();
  let path = source.export_tree(dir.path()).unwrap();

  let mut target = WorkspaceStore::default();
  target.import_tree(&adapter, "space:career", &path).unwrap();
  assert_eq!(target.nodes(), source.nodes());
  assert_eq!(target.tree_id(), "space:career");
  let stored = adapter.load("space:career").unwrap();
  assert_eq!(stored.tree_id, "space:career");
  assert_eq!(stored.nodes.len(), source.nodes().len());
}

#[test]
fn import_rejects_invalid_file_without_touching_store() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("bad.json");
  std::fs::write(&path, r#"{"schemaVersion": 1}"#).unwrap();
  let adapter = PersistenceAdapter::in_memory();
  let mut store = edited_store();
  let nodes = store.nodes().to_vec();
  assert!(matches!(
    store.import_tree(&adapter, "space:body", &path),
    Err(PersistError::InvalidFormat(_))
  ));
  assert_eq!(store.nodes(), nodes.as_slice());
  assert!(adapter.load("space:body").is_none());
}

#[test]
fn hydrate_workspace_seeds_empty_slots() {
  let mut store = edited_store();
  store.hydrate_workspace(&Workspace::empty("education", "Education"));
  assert_eq!(store.tree_id(), "space:education");
  assert_eq!(store.nodes().len(), 1);
  assert_eq!(store.selected_node_id(), Some(ROOT_ID));

  let mut slot = Workspace::empty("career", "Career");
  edited_store().write_back(&mut slot);
  store.hydrate_workspace(&slot);
  assert_eq!(store.nodes().len(), slot.nodes.len());
  assert_eq!(store.viewport(), slot.viewport);
}
