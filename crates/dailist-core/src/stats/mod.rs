//! Statistics module for Dailist
//!
//! Weekly progress over tasks due in the current Monday-start week.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::query::TimeWindow;
use crate::task::Task;

/// Completion summary for the tasks due this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub completed: usize,
    pub remaining: usize,
    /// Whole percent, 0 when nothing is due this week.
    pub completion_rate: u32,
}

impl WeeklyStats {
    pub fn total(&self) -> usize {
        self.completed + self.remaining
    }
}

/// Weekly stats for the week containing `today`.
///
/// Tasks without a due date, or with one that does not parse, are left out.
pub fn weekly_stats(tasks: &[Task], today: NaiveDate) -> WeeklyStats {
    let (completed, total) = tasks
        .iter()
        .filter(|t| {
            t.due_day()
                .is_some_and(|d| TimeWindow::Week.contains(d, today))
        })
        .fold((0usize, 0usize), |(done, total), t| {
            (done + usize::from(t.completed), total + 1)
        });

    let completion_rate = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };

    WeeklyStats {
        completed,
        remaining: total - completed,
        completion_rate,
    }
}
