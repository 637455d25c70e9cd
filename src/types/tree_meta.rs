//! Identity and timestamps of the tree loaded in a store.

use chrono::{DateTime, Utc};

/// Identity and timestamps of the tree loaded in a store.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMeta {
  pub tree_id: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TreeMeta {
  pub fn new(tree_id: impl Into<String>, name: impl Into<String>) -> Self {
    let now = Utc::now();
    Self {
      tree_id: tree_id.into(),
      name: name.into(),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}
