//! Durable key-value media for snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::instrument;

use crate::error::PersistError;

/// A durable key-value medium holding serialized snapshots.
pub trait StorageBackend: Send + Sync {
  /// Raw bytes stored under `key`, or `None` when absent.
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;

  fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistError>;

  /// Removes `key`. Removing an absent key succeeds.
  fn remove(&self, key: &str) -> Result<(), PersistError>;

  /// Every key currently stored, in no particular order.
  fn keys(&self) -> Result<Vec<String>, PersistError>;
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
  root: PathBuf,
}

const FILE_EXTENSION: &str = "json";

/// Bytes kept verbatim in file names; everything else is percent-encoded.
const KEY_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn escape_key(key: &str) -> String {
  utf8_percent_encode(key, KEY_SET).to_string()
}

fn unescape_key(name: &str) -> Option<String> {
  percent_decode_str(name)
    .decode_utf8()
    .ok()
    .map(|key| key.into_owned())
}

impl FileStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self
      .root
      .join(format!("{}.{FILE_EXTENSION}", escape_key(key)))
  }
}

impl StorageBackend for FileStorage {
  #[instrument(level = "trace", skip(self))]
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
    match std::fs::read(self.path_for(key)) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  #[instrument(level = "trace", skip(self, value))]
  fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistError> {
    std::fs::create_dir_all(&self.root)?;
    std::fs::write(self.path_for(key), value)?;
    Ok(())
  }

  #[instrument(level = "trace", skip(self))]
  fn remove(&self, key: &str) -> Result<(), PersistError> {
    match std::fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }

  fn keys(&self) -> Result<Vec<String>, PersistError> {
    let entries = match std::fs::read_dir(&self.root) {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };
    let mut keys = Vec::new();
    for entry in entries {
      let path = entry?.path();
      if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
        continue;
      }
      if let Some(key) = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(unescape_key)
      {
        keys.push(key);
      }
    }
    Ok(keys)
  }
}

/// Shared in-process map, optionally capped at a byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
  quota_bytes: Option<usize>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Refuses writes that would bring the stored total above `bytes`.
  pub fn with_quota(bytes: usize) -> Self {
    Self {
      entries: Arc::default(),
      quota_bytes: Some(bytes),
    }
  }
}

fn poisoned() -> PersistError {
  PersistError::Backend("memory storage lock poisoned".to_string())
}

impl StorageBackend for MemoryStorage {
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
    let entries = self.entries.read().map_err(|_| poisoned())?;
    Ok(entries.get(key).cloned())
  }

  fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistError> {
    let mut entries = self.entries.write().map_err(|_| poisoned())?;
    if let Some(quota) = self.quota_bytes {
      let others: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(_, v)| v.len())
        .sum();
      if others + value.len() > quota {
        return Err(PersistError::Backend(format!(
          "quota exceeded: {} of {quota} bytes",
          others + value.len()
        )));
      }
    }
    entries.insert(key.to_string(), value.to_vec());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), PersistError> {
    let mut entries = self.entries.write().map_err(|_| poisoned())?;
    entries.remove(key);
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>, PersistError> {
    let entries = self.entries.read().map_err(|_| poisoned())?;
    Ok(entries.keys().cloned().collect())
  }
}

#[cfg(test)]
pub(crate) fn escape_roundtrip(key: &str) -> Option<String> {
  unescape_key(&escape_key(key))
}
