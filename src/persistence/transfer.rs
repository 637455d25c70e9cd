//! Export of snapshots to standalone JSON files and import back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::validate::parse_snapshot;
use crate::error::PersistError;
use crate::types::PersistedSnapshot;

/// `treeflow-<tree id>-<unix millis>.json`, with characters outside
/// `[A-Za-z0-9_-]` in the tree id replaced by `_`.
pub fn export_file_name(tree_id: &str, at: DateTime<Utc>) -> String {
  let safe: String = tree_id
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
        c
      } else {
        '_'
      }
    })
    .collect();
  format!("treeflow-{safe}-{}.json", at.timestamp_millis())
}

/// Writes `snapshot` as pretty JSON into `dir` and returns the file path.
#[instrument(level = "trace", skip(dir, snapshot))]
pub fn export_snapshot(dir: &Path, snapshot: &PersistedSnapshot) -> Result<PathBuf, PersistError> {
  let json = serde_json::to_string_pretty(snapshot).map_err(PersistError::Serialize)?;
  std::fs::create_dir_all(dir)?;
  let path = dir.join(export_file_name(&snapshot.tree_id, Utc::now()));
  std::fs::write(&path, json)?;
  info!(path = %path.display(), tree_id = %snapshot.tree_id, "exported snapshot");
  Ok(path)
}

/// Reads and validates an exported snapshot file.
#[instrument(level = "trace", skip(path))]
pub fn read_snapshot_file(path: &Path) -> Result<PersistedSnapshot, PersistError> {
  let bytes = std::fs::read(path)?;
  parse_snapshot(&bytes)
}
