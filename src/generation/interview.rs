//! Interview step: gathers facts and asks one clarifying question.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::retry::RetryPolicy;
use super::{TextModel, Turn, clean_json_string, transcript};
use crate::error::GenerationError;
use crate::types::ChatRole;

/// Reply once the single clarifying question has been answered.
pub const READY_MESSAGE: &str = "Ready to generate the roadmap.";

const FALLBACK_QUESTION: &str =
  "Quick question: what is your timeframe and weekly hours? Example: 6 months, 8 hours per week.";

const CONTEXT_TURNS: usize = 6;

const INTERVIEW_PROMPT: &str = r#"You are an expert roadmap planner.

Behavior:
- Ask at most ONE question total.
- If you already asked one question and the user answered, stop asking questions.
- Be concise and friendly.

Your job:
1) Extract and update facts from user messages.
2) If no question has been asked yet, ask ONE best clarifying question that most improves roadmap quality.
   Prefer multiple choice (2-4 options) or a short numeric answer.

Facts shape (keep it compact):
{"goal": "string", "timeframe": "string", "weeklyHours": "string", "experienceLevel": "string", "constraints": "string", "notes": "string"}

Response format (JSON only):
{"assistantMessage": "string", "facts": {...}, "isReadyToGenerate": true/false}

Return ONLY JSON. No markdown, no code blocks, no extra text."#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewRequest {
  pub messages: Vec<Turn>,
  #[serde(default)]
  pub facts: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewReply {
  pub assistant_message: String,
  pub facts: Map<String, Value>,
  pub is_ready_to_generate: bool,
}

impl InterviewReply {
  fn fallback(facts: &Map<String, Value>) -> Self {
    Self {
      assistant_message: FALLBACK_QUESTION.to_string(),
      facts: facts.clone(),
      is_ready_to_generate: false,
    }
  }
}

fn assistant_questions(messages: &[Turn]) -> usize {
  messages
    .iter()
    .filter(|m| m.role == ChatRole::Assistant && m.content.trim().ends_with('?'))
    .count()
}

fn interview_prompt(req: &InterviewRequest) -> String {
  let facts = Value::Object(req.facts.clone()).to_string();
  format!(
    "{INTERVIEW_PROMPT}\n\nCurrent facts (compact JSON):\n{facts}\n\nConversation (recent only):\n{}\n\nTask:\n- Update facts from the user's goal.\n- Ask ONE best clarifying question that will help generate a good roadmap.\n- Keep the question short.\n\nReturn ONLY the JSON object.",
    transcript(&req.messages, CONTEXT_TURNS)
  )
}

/// Runs one interview turn.
///
/// Once the assistant has asked a question the reply is [READY_MESSAGE]
/// without calling the model. Otherwise the model proposes updated facts and
/// one question; its reply is never marked ready, and a malformed reply is
/// replaced by a canned question.
#[instrument(level = "trace", skip_all, fields(messages = req.messages.len()))]
pub async fn run_interview(
  model: &dyn TextModel,
  req: &InterviewRequest,
  policy: &RetryPolicy,
) -> Result<InterviewReply, GenerationError> {
  if req.messages.is_empty() {
    return Err(GenerationError::InvalidRequest(
      "messages are required".to_string(),
    ));
  }
  if assistant_questions(&req.messages) >= 1 {
    debug!("question already asked, ready to generate");
    return Ok(InterviewReply {
      assistant_message: READY_MESSAGE.to_string(),
      facts: req.facts.clone(),
      is_ready_to_generate: true,
    });
  }

  let prompt = interview_prompt(req);
  let raw = policy
    .run(|_| model.generate(&prompt))
    .await
    .map_err(|e| {
      if e.is_rate_limited() {
        GenerationError::RateLimited {
          message: format!("model rate limit hit, wait 10 to 30 seconds and try again ({e})"),
        }
      } else {
        GenerationError::Model(e.to_string())
      }
    })?;

  let cleaned = clean_json_string(&raw);
  match serde_json::from_str::<InterviewReply>(&cleaned) {
    Ok(mut reply) => {
      reply.is_ready_to_generate = false;
      Ok(reply)
    }
    Err(e) => {
      warn!(error = %e, "malformed interview reply, asking fallback question");
      Ok(InterviewReply::fallback(&req.facts))
    }
  }
}
