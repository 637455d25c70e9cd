//! Canvas coordinates of a node.

use serde::{Deserialize, Serialize};

/// Canvas coordinates of a node (top-left corner, canvas units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Returns this position moved by `(dx, dy)`.
  pub fn offset(self, dx: f64, dy: f64) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}
