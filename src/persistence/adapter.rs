//! Load, save and clear one tree's snapshot in a [StorageBackend].

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use super::backend::{FileStorage, MemoryStorage, StorageBackend};
use super::validate::parse_snapshot;
use crate::error::PersistError;
use crate::types::PersistedSnapshot;

/// Namespace prefix of every snapshot key.
pub const STORAGE_KEY_PREFIX: &str = "treeflow:v1:tree:";

/// Backend key holding the snapshot of `tree_id`.
pub fn storage_key(tree_id: &str) -> String {
  format!("{STORAGE_KEY_PREFIX}{tree_id}")
}

/// Versioned snapshot persistence over a shared backend.
#[derive(Clone)]
pub struct PersistenceAdapter {
  backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for PersistenceAdapter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PersistenceAdapter").finish_non_exhaustive()
  }
}

impl PersistenceAdapter {
  pub fn new(backend: impl StorageBackend + 'static) -> Self {
    Self {
      backend: Arc::new(backend),
    }
  }

  pub fn from_shared(backend: Arc<dyn StorageBackend>) -> Self {
    Self { backend }
  }

  pub fn in_memory() -> Self {
    Self::new(MemoryStorage::new())
  }

  pub fn file(dir: impl Into<PathBuf>) -> Self {
    Self::new(FileStorage::new(dir))
  }

  pub fn backend(&self) -> &Arc<dyn StorageBackend> {
    &self.backend
  }

  /// Reads the snapshot of `tree_id`.
  ///
  /// Absent, unreadable, corrupt or unmigratable data all yield `None`; the
  /// cause is logged.
  #[instrument(level = "trace", skip(self))]
  pub fn load(&self, tree_id: &str) -> Option<PersistedSnapshot> {
    let raw = match self.backend.get(&storage_key(tree_id)) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        error!(tree_id, error = %e, "failed to read persisted snapshot");
        return None;
      }
    };
    match parse_snapshot(&raw) {
      Ok(snapshot) => {
        debug!(tree_id, nodes = snapshot.nodes.len(), "loaded snapshot");
        Some(snapshot)
      }
      Err(e) => {
        warn!(tree_id, error = %e, "ignoring invalid persisted snapshot");
        None
      }
    }
  }

  /// Writes `snapshot` under `tree_id`, replacing any previous one.
  #[instrument(level = "trace", skip(self, snapshot))]
  pub fn save(&self, tree_id: &str, snapshot: &PersistedSnapshot) -> Result<(), PersistError> {
    let json = serde_json::to_vec(snapshot).map_err(PersistError::Serialize)?;
    self
      .backend
      .put(&storage_key(tree_id), &json)
      .inspect_err(|e| error!(tree_id, error = %e, "failed to save snapshot"))
  }

  /// Removes the snapshot of `tree_id`. Nothing stored is not an error.
  #[instrument(level = "trace", skip(self))]
  pub fn clear(&self, tree_id: &str) -> Result<(), PersistError> {
    self.backend.remove(&storage_key(tree_id))
  }

  /// Ids of every tree with a stored snapshot, sorted.
  pub fn tree_ids(&self) -> Result<Vec<String>, PersistError> {
    let mut ids: Vec<String> = self
      .backend
      .keys()?
      .into_iter()
      .filter_map(|k| k.strip_prefix(STORAGE_KEY_PREFIX).map(str::to_string))
      .collect();
    ids.sort();
    Ok(ids)
  }
}
