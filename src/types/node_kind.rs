//! Kind of a diagram node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a diagram node. Drives the default title and the renderer's shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
  #[default]
  Process,
  Decision,
  Start,
  End,
  Note,
}

impl NodeKind {
  pub const ALL: [NodeKind; 5] = [
    NodeKind::Process,
    NodeKind::Decision,
    NodeKind::Start,
    NodeKind::End,
    NodeKind::Note,
  ];

  /// Title given to a node of this kind placed freely on the canvas.
  pub fn default_title(self) -> &'static str {
    match self {
      NodeKind::Process => "New node",
      NodeKind::Decision => "Decision point",
      NodeKind::Start => "Start",
      NodeKind::End => "End",
      NodeKind::Note => "Note",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      NodeKind::Process => "process",
      NodeKind::Decision => "decision",
      NodeKind::Start => "start",
      NodeKind::End => "end",
      NodeKind::Note => "note",
    }
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for NodeKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    NodeKind::ALL
      .into_iter()
      .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("unknown node kind: {s}"))
  }
}
