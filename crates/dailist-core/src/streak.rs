//! Daily-open streak.
//!
//! Consecutive calendar days on which the app was opened. The record is
//! reconciled on load and again after task changes; within one day the
//! second and later runs change nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::KvStore;

/// Key under which the streak record is stored.
pub const STREAK_KEY: &str = "streak";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_opened_date: Option<NaiveDate>,
}

/// Next streak state for an open on `today`.
///
/// - first open ever: 1
/// - already opened today: unchanged
/// - last opened yesterday: +1
/// - anything else, including a date in the future: back to 1
pub fn reconcile(today: NaiveDate, state: StreakState) -> StreakState {
    let current_streak = match state.last_opened_date {
        None => 1,
        Some(last) if last == today => state.current_streak,
        Some(last) if last.succ_opt() == Some(today) => state.current_streak.saturating_add(1),
        Some(_) => 1,
    };
    StreakState {
        current_streak,
        last_opened_date: Some(today),
    }
}

/// Read the streak record; missing or malformed records read as default.
pub fn load_streak<S: KvStore>(kv: &S) -> StreakState {
    match kv.get(STREAK_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored streak is malformed; starting over");
            StreakState::default()
        }),
        Ok(None) => StreakState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read streak");
            StreakState::default()
        }
    }
}

/// Streak record bound to its storage.
pub struct StreakTracker<S> {
    kv: S,
    state: StreakState,
}

impl<S: KvStore> StreakTracker<S> {
    /// Load the record and reconcile it for `today`.
    pub fn open(kv: S, today: NaiveDate) -> Self {
        let state = load_streak(&kv);
        let mut tracker = Self { kv, state };
        tracker.reconcile(today);
        tracker
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    pub fn current(&self) -> u32 {
        self.state.current_streak
    }

    /// Reconcile for `today` and persist. Write failures are logged only.
    pub fn reconcile(&mut self, today: NaiveDate) -> StreakState {
        self.state = reconcile(today, self.state);
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                if let Err(e) = self.kv.set(STREAK_KEY, &json) {
                    tracing::warn!(error = %e, "failed to persist streak");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode streak"),
        }
        tracing::debug!(streak = self.state.current_streak, "streak reconciled");
        self.state
    }

    pub fn into_inner(self) -> S {
        self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(streak: u32, last: Option<NaiveDate>) -> StreakState {
        StreakState {
            current_streak: streak,
            last_opened_date: last,
        }
    }

    #[test]
    fn first_open_starts_at_one() {
        let today = day(2026, 10, 19);
        assert_eq!(reconcile(today, StreakState::default()), state(1, Some(today)));
    }

    #[test]
    fn same_day_is_unchanged() {
        let today = day(2026, 10, 19);
        assert_eq!(reconcile(today, state(7, Some(today))), state(7, Some(today)));
    }

    #[test]
    fn yesterday_extends() {
        let today = day(2026, 10, 19);
        assert_eq!(
            reconcile(today, state(3, Some(day(2026, 10, 18)))).current_streak,
            4
        );
        // Across a month boundary.
        assert_eq!(
            reconcile(day(2026, 11, 1), state(3, Some(day(2026, 10, 31)))).current_streak,
            4
        );
    }

    #[test]
    fn gap_or_future_resets() {
        let today = day(2026, 10, 19);
        assert_eq!(
            reconcile(today, state(3, Some(day(2026, 10, 14)))).current_streak,
            1
        );
        assert_eq!(
            reconcile(today, state(3, Some(day(2026, 10, 20)))).current_streak,
            1
        );
    }

    #[test]
    fn last_open_at_end_of_calendar_resets() {
        let today = day(2026, 10, 19);
        assert_eq!(
            reconcile(today, state(3, Some(NaiveDate::MAX))),
            state(1, Some(today))
        );
    }

    #[test]
    fn far_future_record_does_not_block_open() {
        let db = Database::open_memory().unwrap();
        db.set(
            STREAK_KEY,
            r#"{"currentStreak":3,"lastOpenedDate":"+262142-12-31"}"#,
        )
        .unwrap();
        let tracker = StreakTracker::open(&db, day(2026, 10, 19));
        assert_eq!(tracker.current(), 1);
        assert_eq!(load_streak(&db).last_opened_date, Some(day(2026, 10, 19)));
    }

    #[test]
    fn tracker_persists_and_is_idempotent() {
        let db = Database::open_memory().unwrap();
        let today = day(2026, 10, 19);
        db.set(STREAK_KEY, r#"{"currentStreak":3,"lastOpenedDate":"2026-10-18"}"#)
            .unwrap();

        let mut tracker = StreakTracker::open(&db, today);
        assert_eq!(tracker.current(), 4);
        tracker.reconcile(today);
        assert_eq!(tracker.current(), 4);

        assert_eq!(load_streak(&db), state(4, Some(today)));
    }

    #[test]
    fn malformed_record_starts_over() {
        let db = Database::open_memory().unwrap();
        db.set(STREAK_KEY, "[1,2").unwrap();
        let tracker = StreakTracker::open(&db, day(2026, 10, 19));
        assert_eq!(tracker.current(), 1);
    }
}
