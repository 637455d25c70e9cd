//! Graph primitives over a node list and an edge list.
//!
//! Pure functions with no state of their own. The data does not forbid cycles
//! or multiple parents, so every traversal keeps a visited set.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::instrument;

use crate::types::{ConnectionType, EdgeStyle, HandlePair, Position, Side, TreeEdge, TreeNode};

/// Horizontal distance of a laid-out child column from its parent.
pub const CHILD_OFFSET_X: f64 = 280.0;
/// Vertical distance between siblings in a laid-out column.
pub const SIBLING_SPACING_Y: f64 = 120.0;
/// Stroke width used for every connection type.
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

/// Targets of every edge, grouped by source, in edge order.
pub fn children_map(edges: &[TreeEdge]) -> HashMap<&str, Vec<&str>> {
  let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
  for e in edges {
    map.entry(e.source.as_str()).or_default().push(e.target.as_str());
  }
  map
}

/// Source of the last edge pointing at each node.
pub fn parent_map(edges: &[TreeEdge]) -> HashMap<&str, &str> {
  edges
    .iter()
    .map(|e| (e.target.as_str(), e.source.as_str()))
    .collect()
}

/// Ids reachable from `root_id` along `source -> target` edges, `root_id` included.
///
/// Terminates on cyclic input.
#[instrument(level = "trace", skip(edges))]
pub fn collect_subtree_ids(root_id: &str, edges: &[TreeEdge]) -> HashSet<String> {
  let children = children_map(edges);
  let mut visited: HashSet<String> = HashSet::new();
  let mut stack = vec![root_id];
  while let Some(id) = stack.pop() {
    if !visited.insert(id.to_string()) {
      continue;
    }
    if let Some(kids) = children.get(id) {
      stack.extend(kids.iter().copied().filter(|k| !visited.contains(*k)));
    }
  }
  visited
}

/// Breadth-first visitation order from `root_id`, restricted to ids present in `nodes`.
#[instrument(level = "trace", skip(nodes, edges))]
pub fn bfs_order(root_id: &str, nodes: &[TreeNode], edges: &[TreeEdge]) -> Vec<String> {
  let children = children_map(edges);
  let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
  let mut order = Vec::new();
  let mut seen: HashSet<&str> = HashSet::new();
  let mut queue = VecDeque::from([root_id]);
  while let Some(id) = queue.pop_front() {
    if !seen.insert(id) {
      continue;
    }
    if known.contains(id) {
      order.push(id.to_string());
    }
    if let Some(kids) = children.get(id) {
      queue.extend(kids.iter().copied());
    }
  }
  order
}

/// Chooses attachment sides for an edge from `source` to `target`.
///
/// Mostly-horizontal offsets (ties included) attach right/left, otherwise
/// bottom/top; the sign of the offset picks the direction.
pub fn pick_handles(source: Position, target: Position) -> HandlePair {
  let dx = target.x - source.x;
  let dy = target.y - source.y;
  if dx.abs() >= dy.abs() {
    if dx >= 0.0 {
      HandlePair {
        source: Side::Right,
        target: Side::Left,
      }
    } else {
      HandlePair {
        source: Side::Left,
        target: Side::Right,
      }
    }
  } else if dy >= 0.0 {
    HandlePair {
      source: Side::Bottom,
      target: Side::Top,
    }
  } else {
    HandlePair {
      source: Side::Top,
      target: Side::Bottom,
    }
  }
}

/// Recomputes handles of every automatic edge from current node positions.
///
/// Edges with manual handles keep them. Edges whose endpoints are missing are
/// returned unchanged.
#[instrument(level = "trace", skip_all, fields(edges = edges.len()))]
pub fn with_auto_handles(nodes: &[TreeNode], mut edges: Vec<TreeEdge>) -> Vec<TreeEdge> {
  let positions: HashMap<&str, Position> =
    nodes.iter().map(|n| (n.id.as_str(), n.position)).collect();
  for e in &mut edges {
    if e.manual_handles && e.handles().is_some() {
      continue;
    }
    if let (Some(s), Some(t)) = (
      positions.get(e.source.as_str()),
      positions.get(e.target.as_str()),
    ) {
      e.set_handles(pick_handles(*s, *t));
    }
  }
  edges
}

/// Accent colour of a connection type.
pub fn connection_color(kind: ConnectionType) -> &'static str {
  match kind {
    ConnectionType::Child => "#64748b",
    ConnectionType::Branch => "#3b82f6",
    ConnectionType::Dependency => "#f59e0b",
    ConnectionType::Prerequisite => "#ef4444",
    ConnectionType::Reference => "#8b5cf6",
  }
}

pub fn connection_style(kind: ConnectionType) -> EdgeStyle {
  EdgeStyle {
    stroke: connection_color(kind).to_string(),
    stroke_width: EDGE_STROKE_WIDTH,
  }
}

/// A fully styled edge with handles computed from the two positions.
pub fn styled_edge(
  source: &TreeNode,
  target: &TreeNode,
  kind: ConnectionType,
  label: Option<String>,
) -> TreeEdge {
  let handles = pick_handles(source.position, target.position);
  TreeEdge {
    id: crate::ids::edge_id(&source.id, &target.id),
    source: source.id.clone(),
    target: target.id.clone(),
    source_handle: Some(handles.source),
    target_handle: Some(handles.target),
    manual_handles: false,
    connection_type: kind,
    label,
    animated: kind.is_animated(),
    style: connection_style(kind),
    selected: false,
  }
}

/// Y coordinate of the first of `count` siblings centred on `center_y`.
pub(crate) fn column_start_y(center_y: f64, count: usize) -> f64 {
  center_y - (count.saturating_sub(1) as f64 * SIBLING_SPACING_Y) / 2.0
}

/// Moves the direct children of `parent_id` into a column centred on the parent.
///
/// Only direct children move. Returns false when nothing was laid out.
#[instrument(level = "trace", skip(nodes, edges))]
pub fn layout_children_simple(parent_id: &str, nodes: &mut [TreeNode], edges: &[TreeEdge]) -> bool {
  let Some(parent) = nodes.iter().find(|n| n.id == parent_id).map(|n| n.position) else {
    return false;
  };
  let mut child_ids: Vec<&str> = Vec::new();
  for e in edges.iter().filter(|e| e.source == parent_id) {
    if !child_ids.contains(&e.target.as_str()) {
      child_ids.push(e.target.as_str());
    }
  }
  if child_ids.is_empty() {
    return false;
  }
  let start_y = column_start_y(parent.y, child_ids.len());
  for n in nodes.iter_mut() {
    if let Some(idx) = child_ids.iter().position(|c| *c == n.id) {
      n.position = Position::new(
        parent.x + CHILD_OFFSET_X,
        start_y + idx as f64 * SIBLING_SPACING_Y,
      );
    }
  }
  true
}
