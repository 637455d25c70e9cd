//! Unique id generation for nodes, edges and workspaces.
//!
//! Only uniqueness matters; ids carry no structure beyond the readable
//! `source-target-suffix` shape of edge ids.

use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

/// Length of the random suffix appended to edge ids.
const EDGE_SUFFIX_LEN: usize = 4;

/// Fresh id for a node or chat message.
pub fn new_node_id() -> String {
  Uuid::new_v4().simple().to_string()
}

/// Fresh id for a user-created workspace.
pub fn new_workspace_id() -> String {
  Uuid::new_v4().to_string()
}

/// Edge id for `source -> target`; the random suffix lets parallel edges coexist.
pub fn edge_id(source: &str, target: &str) -> String {
  let suffix: String = rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(EDGE_SUFFIX_LEN)
    .map(char::from)
    .collect();
  format!("{source}-{target}-{suffix}")
}
