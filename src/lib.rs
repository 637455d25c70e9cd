//! # treeflow
//!
//! Workspace state engine for hierarchical node/edge diagrams.
//!
//! ## Architecture
//!
//! - [graph]: pure primitives (subtree collection, handle orientation, styling).
//! - [store]: the mutable working copy of one workspace and every graph edit.
//! - [build]: progressive, cancellable reveal of a final graph.
//! - [persistence]: versioned snapshots on a key-value medium, export/import.
//! - [canvas]: the set of named workspaces and the active pointer.
//! - [autosave] and [workbench]: debounced saves wired to the registry and store.
//! - [generation] and [layout]: collaborator contracts for model-generated trees.

pub mod autosave;
pub mod build;
pub mod canvas;
pub mod config;
pub mod error;
pub mod generation;
pub mod graph;
pub mod ids;
pub mod layout;
pub mod persistence;
pub mod store;
pub mod types;
pub mod workbench;

pub use autosave::{AutoSaver, SaveStatus};
pub use build::{BuildOptions, BuildOutcome, BuildPlan, build_from_tree};
pub use canvas::{CanvasRegistry, DEFAULT_WORKSPACES};
pub use config::EngineConfig;
pub use error::{GenerationError, ModelError, PersistError};
pub use layout::{LayeredLayout, TreeLayout};
pub use persistence::{FileStorage, MemoryStorage, PersistenceAdapter, StorageBackend};
pub use store::{EdgeChange, NodeChange, PendingConnection, SharedStore, WorkspaceStore};
pub use types::{
  ConnectionType, NodeData, NodeKind, PersistedSnapshot, Position, ROOT_ID, TreeEdge, TreeNode,
  Viewport, Workspace,
};
pub use workbench::Workbench;
