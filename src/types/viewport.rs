//! Camera state of a workspace canvas.

use serde::{Deserialize, Serialize};

/// Camera state of a workspace canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
  pub x: f64,
  pub y: f64,
  pub zoom: f64,
}

impl Default for Viewport {
  fn default() -> Self {
    Self {
      x: 0.0,
      y: 0.0,
      zoom: 1.0,
    }
  }
}
