//! A directed, typed connection between two nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConnectionType;

/// Compass side of a node where an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
  Top,
  Right,
  Bottom,
  Left,
}

impl Side {
  pub fn opposite(self) -> Side {
    match self {
      Side::Top => Side::Bottom,
      Side::Right => Side::Left,
      Side::Bottom => Side::Top,
      Side::Left => Side::Right,
    }
  }
}

impl fmt::Display for Side {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Side::Top => "top",
      Side::Right => "right",
      Side::Bottom => "bottom",
      Side::Left => "left",
    };
    f.write_str(s)
  }
}

/// Attachment sides for both ends of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlePair {
  pub source: Side,
  pub target: Side,
}

/// Stroke styling carried for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
  pub stroke: String,
  pub stroke_width: f64,
}

/// A directed, typed connection between two nodes.
///
/// Several edges may join the same pair; identity is the `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEdge {
  pub id: String,
  pub source: String,
  pub target: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_handle: Option<Side>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_handle: Option<Side>,
  /// When set, handles were chosen by the user and are never recomputed.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub manual_handles: bool,
  #[serde(default)]
  pub connection_type: ConnectionType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(default)]
  pub animated: bool,
  pub style: EdgeStyle,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub selected: bool,
}

impl TreeEdge {
  pub fn handles(&self) -> Option<HandlePair> {
    match (self.source_handle, self.target_handle) {
      (Some(source), Some(target)) => Some(HandlePair { source, target }),
      _ => None,
    }
  }

  pub fn set_handles(&mut self, pair: HandlePair) {
    self.source_handle = Some(pair.source);
    self.target_handle = Some(pair.target);
  }

  pub fn touches(&self, node_id: &str) -> bool {
    self.source == node_id || self.target == node_id
  }
}
