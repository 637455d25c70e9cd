//! Per-day usage quota for generation requests.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Default number of uses allowed per calendar day.
pub const DEFAULT_DAILY_LIMIT: u32 = 10;

/// Local calendar date key, `YYYY-MM-DD`.
pub fn today_key() -> String {
  Local::now().format("%Y-%m-%d").to_string()
}

/// Per-day usage quota. There are no timers: callers reset it lazily with
/// [DailyUses::reset_if_new_day] before every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUses {
  pub used: u32,
  pub limit: u32,
  pub day_key: String,
}

impl DailyUses {
  pub fn new(limit: u32, day_key: impl Into<String>) -> Self {
    Self {
      used: 0,
      limit,
      day_key: day_key.into(),
    }
  }

  /// Zeroes `used` when `day_key` differs from the stored key. Returns true on reset.
  pub fn reset_if_new_day(&mut self, day_key: &str) -> bool {
    if self.day_key == day_key {
      return false;
    }
    self.used = 0;
    self.day_key = day_key.to_string();
    true
  }

  /// Counts one use, clamped at `limit`.
  pub fn increment(&mut self) {
    self.used = self.used.saturating_add(1).min(self.limit);
  }

  pub fn has_remaining(&self) -> bool {
    self.used < self.limit
  }
}

impl Default for DailyUses {
  fn default() -> Self {
    Self::new(DEFAULT_DAILY_LIMIT, today_key())
  }
}
