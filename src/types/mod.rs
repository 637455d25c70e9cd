//! Data model of a workspace: nodes, edges, viewport, snapshots and the
//! bookkeeping that travels with them.

mod chat_message;
mod connection_type;
mod daily_uses;
#[cfg(test)]
mod daily_uses_test;
mod node_kind;
#[cfg(test)]
mod node_kind_test;
mod position;
mod snapshot;
#[cfg(test)]
mod snapshot_test;
mod tree_edge;
mod tree_meta;
mod tree_node;
#[cfg(test)]
mod tree_node_test;
mod viewport;
mod workspace;

pub use chat_message::{ChatMessage, ChatRole, ChatScope};
pub use connection_type::ConnectionType;
pub use daily_uses::{DEFAULT_DAILY_LIMIT, DailyUses, today_key};
pub use node_kind::NodeKind;
pub use position::Position;
pub use snapshot::{PersistedSnapshot, SCHEMA_VERSION, UiState};
pub use tree_edge::{EdgeStyle, HandlePair, Side, TreeEdge};
pub use tree_meta::TreeMeta;
pub use tree_node::{Dimensions, NodeData, NodeDataPatch, ROOT_ID, TreeNode};
pub use viewport::Viewport;
pub use workspace::{Workspace, tree_id_for};
