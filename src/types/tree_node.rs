//! A node on the workspace canvas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{NodeKind, Position};

/// Id of the structurally protected node every workspace is seeded with.
pub const ROOT_ID: &str = "root";

fn default_color() -> String {
  "slate".to_string()
}

/// Display payload of a node.
///
/// The engine only reads `title` and `completed`; every other field is carried
/// through untouched, including unknown keys in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub notes: String,
  #[serde(default)]
  pub completed: bool,
  #[serde(default = "default_color")]
  pub color: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl NodeData {
  pub fn titled(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      description: String::new(),
      notes: String::new(),
      completed: false,
      color: default_color(),
      icon: None,
      extra: Map::new(),
    }
  }

  /// Shallow-merges `patch` into this payload; `None` fields are left as they are.
  pub fn apply(&mut self, patch: NodeDataPatch) {
    if let Some(title) = patch.title {
      self.title = title;
    }
    if let Some(description) = patch.description {
      self.description = description;
    }
    if let Some(notes) = patch.notes {
      self.notes = notes;
    }
    if let Some(completed) = patch.completed {
      self.completed = completed;
    }
    if let Some(color) = patch.color {
      self.color = color;
    }
    if let Some(icon) = patch.icon {
      self.icon = Some(icon);
    }
    self.extra.extend(patch.extra);
  }
}

/// Partial update for [NodeData].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDataPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub completed: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl NodeDataPatch {
  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn completed(mut self, completed: bool) -> Self {
    self.completed = Some(completed);
    self
  }

  pub fn color(mut self, color: impl Into<String>) -> Self {
    self.color = Some(color.into());
    self
  }
}

/// Measured size of a node as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
  pub width: f64,
  pub height: f64,
}

/// A node on the workspace canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
  pub id: String,
  #[serde(rename = "type", default)]
  pub kind: NodeKind,
  pub position: Position,
  pub data: NodeData,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub selected: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dimensions: Option<Dimensions>,
}

impl TreeNode {
  pub fn new(id: impl Into<String>, kind: NodeKind, position: Position, data: NodeData) -> Self {
    Self {
      id: id.into(),
      kind,
      position,
      data,
      selected: false,
      dimensions: None,
    }
  }

  /// The node a fresh workspace starts with.
  pub fn default_root() -> Self {
    let mut data = NodeData::titled("Start here");
    data.description = "Your main goal goes here".to_string();
    Self::new(ROOT_ID, NodeKind::Process, Position::ORIGIN, data)
  }

  pub fn is_root(&self) -> bool {
    self.id == ROOT_ID
  }
}
