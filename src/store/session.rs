//! Chat log and daily usage quota of the live workspace.

use tracing::debug;

use super::WorkspaceStore;
use crate::types::{ChatMessage, ChatScope, DailyUses, today_key};

impl WorkspaceStore {
  pub fn chat(&self) -> &[ChatMessage] {
    &self.chat
  }

  pub fn chat_scope(&self) -> &ChatScope {
    &self.chat_scope
  }

  pub fn set_chat_scope(&mut self, scope: ChatScope) {
    self.chat_scope = scope;
  }

  pub fn add_chat(&mut self, message: ChatMessage) {
    self.chat.push(message);
    self.touch();
  }

  /// Messages belonging to the current chat scope, oldest first.
  pub fn visible_messages(&self) -> Vec<&ChatMessage> {
    self
      .chat
      .iter()
      .filter(|m| m.scope == self.chat_scope)
      .collect()
  }

  pub fn daily_uses(&self) -> &DailyUses {
    &self.daily_uses
  }

  /// Zeroes the quota when the local calendar day changed. Call before any quota check.
  pub fn reset_daily_if_needed(&mut self) {
    self.reset_daily_if_needed_at(&today_key());
  }

  pub fn reset_daily_if_needed_at(&mut self, day_key: &str) {
    if self.daily_uses.reset_if_new_day(day_key) {
      debug!(day_key, "daily quota reset");
    }
  }

  pub fn increment_daily_use(&mut self) {
    self.daily_uses.increment();
  }
}
