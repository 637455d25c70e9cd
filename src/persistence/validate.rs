//! Structural validation and schema migration of stored snapshots.

use serde_json::Value;
use tracing::warn;

use crate::error::PersistError;
use crate::types::{PersistedSnapshot, SCHEMA_VERSION};

/// True when `value` has the shape of a snapshot: numeric `schemaVersion`,
/// string `treeId` and `updatedAt`, array `nodes` and `edges`, and a
/// `viewport` object with numeric `x`, `y` and `zoom`.
///
/// Node and edge contents are not inspected here.
pub fn validate_snapshot(value: &Value) -> bool {
  let Some(obj) = value.as_object() else {
    return false;
  };
  let is_number = |v: Option<&Value>| v.is_some_and(Value::is_number);
  let is_string = |v: Option<&Value>| v.is_some_and(Value::is_string);
  let is_array = |v: Option<&Value>| v.is_some_and(Value::is_array);

  if !is_number(obj.get("schemaVersion"))
    || !is_string(obj.get("treeId"))
    || !is_string(obj.get("updatedAt"))
    || !is_array(obj.get("nodes"))
    || !is_array(obj.get("edges"))
  {
    return false;
  }
  match obj.get("viewport").and_then(Value::as_object) {
    Some(vp) => is_number(vp.get("x")) && is_number(vp.get("y")) && is_number(vp.get("zoom")),
    None => false,
  }
}

/// Brings a snapshot up to [SCHEMA_VERSION].
///
/// Only version 1 exists, so it passes through and any other version is
/// rejected with `None`.
pub fn migrate_snapshot(snapshot: PersistedSnapshot) -> Option<PersistedSnapshot> {
  if snapshot.schema_version == SCHEMA_VERSION {
    return Some(snapshot);
  }
  warn!(
    schema_version = snapshot.schema_version,
    tree_id = %snapshot.tree_id,
    "unknown snapshot schema version"
  );
  None
}

/// Parses, validates, decodes and migrates raw snapshot bytes.
pub fn parse_snapshot(bytes: &[u8]) -> Result<PersistedSnapshot, PersistError> {
  let value: Value = serde_json::from_slice(bytes).map_err(PersistError::InvalidJson)?;
  if !validate_snapshot(&value) {
    return Err(PersistError::InvalidFormat(
      "missing or mistyped snapshot fields".to_string(),
    ));
  }
  let snapshot: PersistedSnapshot =
    serde_json::from_value(value).map_err(|e| PersistError::InvalidFormat(e.to_string()))?;
  let version = snapshot.schema_version;
  migrate_snapshot(snapshot).ok_or_else(|| {
    PersistError::InvalidFormat(format!("unsupported schema version {version}"))
  })
}
