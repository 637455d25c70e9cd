//! Tree generation: asks the model for a node/edge structure.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::retry::RetryPolicy;
use super::{TextModel, Turn, clean_json_string, transcript};
use crate::error::{GenerationError, ModelError};
use crate::graph::styled_edge;
use crate::types::{ConnectionType, NodeData, NodeKind, Position, TreeEdge, TreeNode};

const CONTEXT_TURNS: usize = 4;

const FIX_JSON_SUFFIX: &str = "\n\nFix ONLY the JSON to match the schema exactly. Return ONLY valid JSON.";

const TREE_PROMPT: &str = r#"You are a decision tree architect. Generate a complete, actionable tree structure based on the interview facts.

Requirements:
- Node titles: 3-9 words, actionable and specific
- Node descriptions: 1 short sentence, maximum 15 words

Node types: "process", "decision", "start" (root only), "end", "note".

Positions: set every node position to {"x": 0, "y": 0}. The client lays out the graph.

Node ID format: "root", "node-1", "node-2", etc.
Edge ID format: "{sourceId}-{targetId}"

Output JSON schema:
{"nodes": [{"id": "string", "type": "string", "position": {"x": 0, "y": 0}, "data": {"title": "string", "description": "string", "notes": "string", "completed": false, "color": "string", "nodeType": "string"}}],
 "edges": [{"id": "string", "source": "string", "target": "string"}]}

CRITICAL: Return ONLY valid JSON. No markdown, no explanations, no extra text."#;

/// Structural limits passed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConstraints {
  pub max_depth: u32,
  pub max_nodes: u32,
  pub max_branches: u32,
}

impl Default for TreeConstraints {
  fn default() -> Self {
    Self {
      max_depth: 3,
      max_nodes: 25,
      max_branches: 4,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateTreeRequest {
  pub messages: Vec<Turn>,
  pub facts: Map<String, Value>,
  #[serde(default)]
  pub constraints: TreeConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedNodeData {
  pub title: String,
  pub description: String,
  pub notes: String,
  pub completed: bool,
  pub color: String,
  pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNode {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub position: Position,
  pub data: GeneratedNodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEdge {
  pub id: String,
  pub source: String,
  pub target: String,
}

/// Candidate graph as returned by the model, positions still placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTree {
  pub nodes: Vec<GeneratedNode>,
  pub edges: Vec<GeneratedEdge>,
}

impl GeneratedTree {
  /// Checks that there is at least one node, that ids are present and that
  /// every edge joins two existing nodes.
  pub fn validate(&self) -> Result<(), String> {
    if self.nodes.is_empty() {
      return Err("tree has no nodes".to_string());
    }
    if let Some(n) = self.nodes.iter().find(|n| n.id.is_empty() || n.kind.is_empty()) {
      return Err(format!("node without id or type: {n:?}"));
    }
    let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
    for e in &self.edges {
      if e.id.is_empty() || e.source.is_empty() || e.target.is_empty() {
        return Err(format!("incomplete edge: {e:?}"));
      }
      if !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()) {
        return Err(format!("edge references missing node: {e:?}"));
      }
    }
    Ok(())
  }

  /// Starter tree used when the model never produced a valid one.
  pub fn fallback() -> Self {
    let node = |id: &str, kind: &str, title: &str, description: &str| GeneratedNode {
      id: id.to_string(),
      kind: kind.to_string(),
      position: Position::ORIGIN,
      data: GeneratedNodeData {
        title: title.to_string(),
        description: description.to_string(),
        notes: String::new(),
        completed: false,
        color: "slate".to_string(),
        node_type: kind.to_string(),
      },
    };
    let edge = |source: &str, target: &str| GeneratedEdge {
      id: format!("{source}-{target}"),
      source: source.to_string(),
      target: target.to_string(),
    };
    Self {
      nodes: vec![
        node("root", "start", "Define your goal", "Write down what success looks like."),
        node("node-1", "process", "Learn the fundamentals", "Collect the core resources to study first."),
        node("node-2", "process", "Plan your weekly schedule", "Block fixed hours for steady progress."),
        node("node-3", "end", "Review progress monthly", "Check results and adjust the plan."),
      ],
      edges: vec![
        edge("root", "node-1"),
        edge("root", "node-2"),
        edge("root", "node-3"),
      ],
    }
  }

  /// Converts to engine nodes and child edges.
  ///
  /// Node kinds come from `type`, then `data.nodeType`, then default to process.
  pub fn into_graph(self) -> (Vec<TreeNode>, Vec<TreeEdge>) {
    let nodes: Vec<TreeNode> = self
      .nodes
      .into_iter()
      .map(|g| {
        let kind = g
          .kind
          .parse::<NodeKind>()
          .or_else(|_| g.data.node_type.parse::<NodeKind>())
          .unwrap_or_default();
        let mut data = NodeData::titled(g.data.title);
        data.description = g.data.description;
        data.notes = g.data.notes;
        data.completed = g.data.completed;
        data.color = g.data.color;
        TreeNode::new(g.id, kind, g.position, data)
      })
      .collect();
    let by_id: HashMap<&str, &TreeNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let edges = self
      .edges
      .iter()
      .filter_map(|e| {
        let (s, t) = (by_id.get(e.source.as_str())?, by_id.get(e.target.as_str())?);
        Some(styled_edge(s, t, ConnectionType::Child, None))
      })
      .collect();
    (nodes, edges)
  }
}

/// Why one generation attempt failed.
#[derive(Debug)]
enum AttemptError {
  Model(ModelError),
  Malformed(String),
}

impl super::retry::RetryableError for AttemptError {
  fn is_rate_limited(&self) -> bool {
    matches!(self, AttemptError::Model(e) if e.is_rate_limited())
  }

  fn describe(&self) -> String {
    match self {
      AttemptError::Model(e) => e.to_string(),
      AttemptError::Malformed(msg) => msg.clone(),
    }
  }
}

fn tree_prompt(req: &GenerateTreeRequest) -> String {
  let facts = Value::Object(req.facts.clone()).to_string();
  let c = req.constraints;
  format!(
    "{TREE_PROMPT}\n\nInterview facts (compact JSON):\n{facts}\n\nRecent context (last turns only):\n{}\n\nConstraints:\n- Max depth: {}\n- Max total nodes: {}\n- Main branches from root: 2-{}\n\nGenerate a complete, actionable decision tree. Return ONLY the JSON with nodes and edges arrays.",
    transcript(&req.messages, CONTEXT_TURNS),
    c.max_depth,
    c.max_nodes,
    c.max_branches
  )
}

fn parse_tree(raw: &str) -> Result<GeneratedTree, AttemptError> {
  let tree: GeneratedTree = serde_json::from_str(&clean_json_string(raw))
    .map_err(|e| AttemptError::Malformed(e.to_string()))?;
  tree.validate().map_err(AttemptError::Malformed)?;
  Ok(tree)
}

/// Asks the model for a tree, retrying with a "fix the JSON" nudge.
///
/// After the last attempt a rate limit is returned as
/// [GenerationError::RateLimited] and other model failures as
/// [GenerationError::Model]; malformed output yields [GeneratedTree::fallback].
#[instrument(level = "trace", skip_all, fields(messages = req.messages.len()))]
pub async fn generate_tree(
  model: &dyn TextModel,
  req: &GenerateTreeRequest,
  policy: &RetryPolicy,
) -> Result<GeneratedTree, GenerationError> {
  if req.messages.is_empty() {
    return Err(GenerationError::InvalidRequest(
      "messages are required".to_string(),
    ));
  }
  if req.facts.is_empty() {
    return Err(GenerationError::InvalidRequest("facts are required".to_string()));
  }

  let base = tree_prompt(req);
  let result = policy
    .run(|attempt| {
      let prompt = if attempt == 1 {
        base.clone()
      } else {
        format!("{base}{FIX_JSON_SUFFIX}")
      };
      async move {
        let raw = model.generate(&prompt).await.map_err(AttemptError::Model)?;
        parse_tree(&raw)
      }
    })
    .await;

  match result {
    Ok(tree) => {
      info!(nodes = tree.nodes.len(), edges = tree.edges.len(), "tree generated");
      Ok(tree)
    }
    Err(AttemptError::Model(e)) if e.is_rate_limited() => Err(GenerationError::RateLimited {
      message: format!("model rate limit hit, wait 30 to 60 seconds and try again ({e})"),
    }),
    Err(AttemptError::Model(e)) => Err(GenerationError::Model(e.to_string())),
    Err(AttemptError::Malformed(msg)) => {
      warn!(error = %msg, "no valid tree after retries, using starter tree");
      Ok(GeneratedTree::fallback())
    }
  }
}
