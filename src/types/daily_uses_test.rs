//! Tests for `DailyUses`.

use super::DailyUses;

#[test]
fn increment_clamps_at_limit() {
  let mut d = DailyUses::new(2, "2026-02-14");
  d.increment();
  d.increment();
  d.increment();
  assert_eq!(d.used, 2);
  assert!(!d.has_remaining());
}

#[test]
fn reset_only_on_new_day() {
  let mut d = DailyUses::new(3, "2026-02-14");
  d.increment();
  assert!(!d.reset_if_new_day("2026-02-14"));
  assert_eq!(d.used, 1);
  assert!(d.reset_if_new_day("2026-02-15"));
  assert_eq!(d.used, 0);
  assert_eq!(d.day_key, "2026-02-15");
}

#[test]
fn default_key_is_a_date() {
  let d = DailyUses::default();
  assert_eq!(d.day_key.len(), 10);
  assert_eq!(d.day_key.as_bytes()[4], b'-');
  assert_eq!(d.limit, 10);
}

#[test]
fn increment_saturates_on_corrupt_counter() {
  let mut d = DailyUses::new(u32::MAX, "2026-02-14");
  d.used = u32::MAX;
  d.increment();
  assert_eq!(d.used, u32::MAX);
  assert!(!d.has_remaining());
}
