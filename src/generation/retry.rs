//! Retry and backoff policy for model calls.

use std::future::Future;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder, Retryable};
use tracing::warn;

use crate::error::ModelError;

/// Upper bound on any single rate-limit pause.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// How often and how patiently a model call is retried.
///
/// Rate-limited attempts wait `initial_interval * backoff_factor^(n-1)`
/// before retry `n`, capped at [MAX_BACKOFF]; any other failure waits
/// `fixed_pause`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
  pub initial_interval: Duration,
  pub backoff_factor: f32,
  pub fixed_pause: Duration,
  /// Attempts including the first.
  pub max_attempts: u32,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      initial_interval: Duration::from_millis(900),
      backoff_factor: 2.0,
      fixed_pause: Duration::from_millis(200),
      max_attempts: 3,
    }
  }
}

impl RetryPolicy {
  /// Pacing used by the interview step.
  pub fn interview() -> Self {
    Self::default()
  }

  /// Pacing used by tree generation.
  pub fn tree() -> Self {
    Self::default()
      .with_initial_interval(Duration::from_millis(1200))
      .with_fixed_pause(Duration::from_millis(300))
  }

  pub fn with_initial_interval(mut self, interval: Duration) -> Self {
    self.initial_interval = interval;
    self
  }

  pub fn with_backoff_factor(mut self, factor: f32) -> Self {
    self.backoff_factor = factor;
    self
  }

  pub fn with_fixed_pause(mut self, pause: Duration) -> Self {
    self.fixed_pause = pause;
    self
  }

  pub fn with_max_attempts(mut self, attempts: u32) -> Self {
    self.max_attempts = attempts.max(1);
    self
  }

  /// Exponential series for up to `retries` rate-limited retries.
  fn backoff(&self, retries: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
      .with_min_delay(self.initial_interval)
      .with_max_delay(MAX_BACKOFF)
      .with_factor(self.backoff_factor)
      .with_max_times(retries)
  }

  /// Pause after failed attempt number `attempt` (1-based).
  pub fn delay_for_attempt(&self, attempt: u32, rate_limited: bool) -> Duration {
    if !rate_limited {
      return self.fixed_pause;
    }
    if attempt == 0 {
      return Duration::ZERO;
    }
    let step = attempt as usize - 1;
    self
      .backoff(attempt as usize)
      .build()
      .nth(step)
      .map_or(MAX_BACKOFF, whole_millis)
  }

  /// Calls `op` until it succeeds or attempts run out, pausing between tries.
  ///
  /// `op` receives the 1-based attempt number. The last error is returned.
  pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
  where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError,
  {
    let retries = self.max_attempts.saturating_sub(1) as usize;
    let fixed_pause = self.fixed_pause;
    let mut attempt = 0;
    let call = || {
      attempt += 1;
      op(attempt)
    };
    call
      .retry(self.backoff(retries))
      .sleep(tokio::time::sleep)
      .when(|e: &E| e.is_retryable())
      .adjust(move |e: &E, delay| {
        delay.map(|d| {
          if e.is_rate_limited() {
            whole_millis(d)
          } else {
            fixed_pause
          }
        })
      })
      .notify(|e: &E, delay| {
        warn!(?delay, error = %e.describe(), "model call failed, retrying");
      })
      .await
  }
}

/// backon scales delays in `f32`; pacing is kept to whole milliseconds.
fn whole_millis(d: Duration) -> Duration {
  Duration::from_millis((d.as_secs_f64() * 1000.0).round() as u64)
}

/// Errors a [RetryPolicy] can classify.
pub trait RetryableError {
  fn is_rate_limited(&self) -> bool;
  fn describe(&self) -> String;

  fn is_retryable(&self) -> bool {
    true
  }
}

impl RetryableError for ModelError {
  fn is_rate_limited(&self) -> bool {
    ModelError::is_rate_limited(self)
  }

  fn describe(&self) -> String {
    self.to_string()
  }
}
