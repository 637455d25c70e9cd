//! Semantic type of a connection between two nodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic type of a connection between two nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
  #[default]
  Child,
  Branch,
  Dependency,
  Prerequisite,
  Reference,
}

impl ConnectionType {
  pub const ALL: [ConnectionType; 5] = [
    ConnectionType::Child,
    ConnectionType::Branch,
    ConnectionType::Dependency,
    ConnectionType::Prerequisite,
    ConnectionType::Reference,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ConnectionType::Child => "child",
      ConnectionType::Branch => "branch",
      ConnectionType::Dependency => "dependency",
      ConnectionType::Prerequisite => "prerequisite",
      ConnectionType::Reference => "reference",
    }
  }

  /// Whether edges of this type are drawn animated.
  pub fn is_animated(self) -> bool {
    matches!(
      self,
      ConnectionType::Dependency | ConnectionType::Prerequisite
    )
  }
}

impl fmt::Display for ConnectionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ConnectionType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ConnectionType::ALL
      .into_iter()
      .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("unknown connection type: {s}"))
  }
}
