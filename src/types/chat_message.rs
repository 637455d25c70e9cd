//! Chat log entries attached to a workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  User,
  Assistant,
  System,
}

/// Which conversation a message belongs to: the whole workspace or one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "nodeId", rename_all = "lowercase")]
pub enum ChatScope {
  #[default]
  Workspace,
  Node(String),
}

/// One entry of the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub id: String,
  pub role: ChatRole,
  pub content: String,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub scope: ChatScope,
}

impl ChatMessage {
  pub fn new(role: ChatRole, content: impl Into<String>, scope: ChatScope) -> Self {
    Self {
      id: crate::ids::new_node_id(),
      role,
      content: content.into(),
      created_at: Utc::now(),
      scope,
    }
  }

  /// Greeting shown in a fresh workspace.
  pub fn welcome() -> Self {
    Self {
      id: "welcome".to_string(),
      role: ChatRole::Assistant,
      content: "Tell me what you want to achieve. I will ask a few questions, then you can generate your roadmap."
        .to_string(),
      created_at: Utc::now(),
      scope: ChatScope::Workspace,
    }
  }
}
