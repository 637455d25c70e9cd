//! Error types for persistence and generation.
//!
//! Invalid operation arguments (unknown ids, deleting the root, out-of-range
//! counts) are not errors: store operations treat them as no-ops.

use thiserror::Error;

/// Failure reading or writing durable workspace state.
#[derive(Debug, Error)]
pub enum PersistError {
  #[error("storage I/O failed: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to serialize snapshot: {0}")]
  Serialize(#[source] serde_json::Error),
  #[error("invalid JSON: {0}")]
  InvalidJson(#[source] serde_json::Error),
  #[error("invalid treeflow data format: {0}")]
  InvalidFormat(String),
  /// Medium unavailable, quota exceeded and similar backend refusals.
  #[error("storage backend error: {0}")]
  Backend(String),
}

/// Error reported by a text model for a single call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
  #[error("rate limited: {0}")]
  RateLimited(String),
  #[error("{0}")]
  Other(String),
}

impl ModelError {
  /// Classifies a free-text failure, treating quota and 429 wording as rate limiting.
  pub fn from_message(msg: impl Into<String>) -> Self {
    let msg = msg.into();
    if is_rate_limit_message(&msg) {
      ModelError::RateLimited(msg)
    } else {
      ModelError::Other(msg)
    }
  }

  pub fn is_rate_limited(&self) -> bool {
    matches!(self, ModelError::RateLimited(_))
  }
}

/// True when an error message describes rate limiting or an exhausted quota.
pub fn is_rate_limit_message(msg: &str) -> bool {
  let lower = msg.to_lowercase();
  lower.contains("429")
    || lower.contains("resource exhausted")
    || lower.contains("too many requests")
    || lower.contains("quota")
}

/// Failure of an interview or tree-generation request after retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
  /// Still rate limited after every attempt; the caller should ask the user to wait.
  #[error("rate limit hit: {message}")]
  RateLimited { message: String },
  #[error("invalid request: {0}")]
  InvalidRequest(String),
  #[error("model failure: {0}")]
  Model(String),
}
