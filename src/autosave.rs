//! Debounced trailing-edge autosave.
//!
//! Each [AutoSaver::schedule] replaces the pending save of the same tree, so a
//! burst of edits collapses into one write once the debounce window passes
//! quietly. Pending saves of different trees are independent and can be
//! cancelled per tree, which is what a workspace switch needs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use crate::persistence::PersistenceAdapter;
use crate::types::PersistedSnapshot;

/// Result of the most recent autosave attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
  Idle,
  Saved { tree_id: String, at: DateTime<Utc> },
  Failed { tree_id: String, message: String },
}

pub struct AutoSaver {
  adapter: PersistenceAdapter,
  debounce: Duration,
  pending: HashMap<String, JoinHandle<()>>,
  status: Arc<watch::Sender<SaveStatus>>,
}

impl std::fmt::Debug for AutoSaver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AutoSaver")
      .field("debounce", &self.debounce)
      .field("pending", &self.pending.keys().collect::<Vec<_>>())
      .finish_non_exhaustive()
  }
}

impl AutoSaver {
  pub fn new(adapter: PersistenceAdapter, debounce: Duration) -> Self {
    let (status, _) = watch::channel(SaveStatus::Idle);
    Self {
      adapter,
      debounce,
      pending: HashMap::new(),
      status: Arc::new(status),
    }
  }

  /// Saves `snapshot` under `tree_id` after the debounce window, replacing
  /// any save still pending for that tree. Must be called inside a Tokio runtime.
  #[instrument(level = "trace", skip(self, snapshot))]
  pub fn schedule(&mut self, tree_id: &str, snapshot: PersistedSnapshot) {
    self.cancel_for(tree_id);
    let adapter = self.adapter.clone();
    let status = Arc::clone(&self.status);
    let debounce = self.debounce;
    let id = tree_id.to_string();
    let handle = tokio::spawn(async move {
      tokio::time::sleep(debounce).await;
      let next = match adapter.save(&id, &snapshot) {
        Ok(()) => {
          debug!(tree_id = %id, "autosaved");
          SaveStatus::Saved {
            tree_id: id,
            at: Utc::now(),
          }
        }
        Err(e) => {
          error!(tree_id = %id, error = %e, "autosave failed");
          SaveStatus::Failed {
            tree_id: id,
            message: e.to_string(),
          }
        }
      };
      status.send_replace(next);
    });
    self.pending.insert(tree_id.to_string(), handle);
  }

  /// Drops the pending save of `tree_id`, if any. Returns whether one was pending.
  pub fn cancel_for(&mut self, tree_id: &str) -> bool {
    match self.pending.remove(tree_id) {
      Some(handle) => {
        let was_pending = !handle.is_finished();
        handle.abort();
        if was_pending {
          debug!(tree_id, "pending autosave cancelled");
        }
        was_pending
      }
      None => false,
    }
  }

  /// Drops every pending save.
  pub fn cancel_all(&mut self) {
    for (_, handle) in self.pending.drain() {
      handle.abort();
    }
  }

  pub fn is_pending(&self, tree_id: &str) -> bool {
    self
      .pending
      .get(tree_id)
      .is_some_and(|h| !h.is_finished())
  }

  /// Watches the outcome of autosave attempts.
  pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
    self.status.subscribe()
  }

  pub fn status(&self) -> SaveStatus {
    self.status.borrow().clone()
  }
}
