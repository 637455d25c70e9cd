//! Generative content collaborator: the interview step and tree generation.
//!
//! Both talk to a [TextModel] through a [RetryPolicy]. Rate-limit failures back
//! off exponentially; other failures pause briefly. After the last attempt a
//! rate limit surfaces as [crate::error::GenerationError::RateLimited], while
//! malformed model output degrades to a canned response.

mod interview;
mod retry;
mod tree;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::ChatRole;

pub use interview::{InterviewReply, InterviewRequest, READY_MESSAGE, run_interview};
pub use retry::{RetryPolicy, RetryableError};
pub use tree::{
  GenerateTreeRequest, GeneratedEdge, GeneratedNode, GeneratedNodeData, GeneratedTree,
  TreeConstraints, generate_tree,
};

/// A text-in, text-out generative model.
#[async_trait]
pub trait TextModel: Send + Sync {
  async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// One conversation turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
  pub role: ChatRole,
  pub content: String,
}

impl Turn {
  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role: ChatRole::User,
      content: content.into(),
    }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self {
      role: ChatRole::Assistant,
      content: content.into(),
    }
  }
}

static LEADING_FENCE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)^```(?:json)?\s*").ok());
static TRAILING_FENCE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\s*```$").ok());

fn strip(re: &Option<Regex>, text: &str) -> String {
  match re {
    Some(re) => re.replace(text, "").into_owned(),
    None => text.to_string(),
  }
}

/// Strips surrounding Markdown code fences from a model reply.
pub fn clean_json_string(text: &str) -> String {
  let without_lead = strip(&LEADING_FENCE, text.trim());
  strip(&TRAILING_FENCE, &without_lead).trim().to_string()
}

/// The last `keep` turns as `User: ...` / `Assistant: ...` lines.
pub(crate) fn transcript(turns: &[Turn], keep: usize) -> String {
  let start = turns.len().saturating_sub(keep);
  turns[start..]
    .iter()
    .map(|t| {
      let who = match t.role {
        ChatRole::User => "User",
        _ => "Assistant",
      };
      format!("{who}: {}", t.content)
    })
    .collect::<Vec<_>>()
    .join("\n")
}
