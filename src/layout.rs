//! Layout collaborator: assigns positions to a graph before it is built.
//!
//! The engine itself only re-stacks direct children (see
//! [crate::graph::layout_children_simple]); whole-graph placement sits behind
//! [TreeLayout] so callers can plug in their own algorithm.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::instrument;

use crate::graph::{CHILD_OFFSET_X, SIBLING_SPACING_Y, children_map};
use crate::types::{Position, TreeEdge, TreeNode};

/// Fills in `position` for every node of a graph.
pub trait TreeLayout {
  fn layout(&self, nodes: Vec<TreeNode>, edges: Vec<TreeEdge>) -> (Vec<TreeNode>, Vec<TreeEdge>);
}

/// Left-to-right layered placement: one column per breadth-first depth, each
/// column centred on `y = 0`.
///
/// Nodes without incoming edges start at depth 0. Nodes unreachable from any
/// of them (pure cycles) are placed in a final extra column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredLayout {
  pub column_spacing: f64,
  pub row_spacing: f64,
}

impl Default for LayeredLayout {
  fn default() -> Self {
    Self {
      column_spacing: CHILD_OFFSET_X,
      row_spacing: SIBLING_SPACING_Y,
    }
  }
}

impl TreeLayout for LayeredLayout {
  #[instrument(level = "trace", skip_all, fields(nodes = nodes.len()))]
  fn layout(&self, mut nodes: Vec<TreeNode>, edges: Vec<TreeEdge>) -> (Vec<TreeNode>, Vec<TreeEdge>) {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let targets: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    let children = children_map(&edges);

    let mut depth: HashMap<String, usize> = HashMap::new();
    let mut layers: Vec<Vec<String>> = Vec::new();
    let mut queue: VecDeque<(&str, usize)> = nodes
      .iter()
      .filter(|n| !targets.contains(n.id.as_str()))
      .map(|n| (n.id.as_str(), 0))
      .collect();
    while let Some((id, d)) = queue.pop_front() {
      if depth.contains_key(id) || !known.contains(id) {
        continue;
      }
      depth.insert(id.to_string(), d);
      if layers.len() <= d {
        layers.resize_with(d + 1, Vec::new);
      }
      layers[d].push(id.to_string());
      if let Some(kids) = children.get(id) {
        queue.extend(kids.iter().map(|k| (*k, d + 1)));
      }
    }
    let stragglers: Vec<String> = nodes
      .iter()
      .filter(|n| !depth.contains_key(&n.id))
      .map(|n| n.id.clone())
      .collect();
    if !stragglers.is_empty() {
      layers.push(stragglers);
    }

    let mut placed: HashMap<String, Position> = HashMap::new();
    for (col, layer) in layers.iter().enumerate() {
      let start = -(layer.len().saturating_sub(1) as f64 * self.row_spacing) / 2.0;
      for (row, id) in layer.iter().enumerate() {
        placed.insert(
          id.clone(),
          Position::new(
            col as f64 * self.column_spacing,
            start + row as f64 * self.row_spacing,
          ),
        );
      }
    }
    for n in &mut nodes {
      if let Some(pos) = placed.get(&n.id) {
        n.position = *pos;
      }
    }
    (nodes, edges)
  }
}
