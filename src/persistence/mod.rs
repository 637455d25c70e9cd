//! Versioned persistence of workspace snapshots.
//!
//! - [StorageBackend]: the durable key-value medium ([FileStorage], [MemoryStorage]).
//! - [PersistenceAdapter]: load/save/clear of one tree's snapshot under a namespaced key.
//! - [validate_snapshot] / [migrate_snapshot]: structural check and schema migration.
//! - [export_snapshot] / [read_snapshot_file]: file export and import.

mod adapter;
mod backend;
mod transfer;
#[cfg(test)]
mod transfer_test;
mod validate;
#[cfg(test)]
mod validate_test;

pub use adapter::{PersistenceAdapter, STORAGE_KEY_PREFIX, storage_key};
pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use transfer::{export_file_name, export_snapshot, read_snapshot_file};
pub use validate::{migrate_snapshot, parse_snapshot, validate_snapshot};
