//! Pure queries over a task list.
//!
//! All comparisons are on local calendar days. Callers pass `today`
//! explicitly; [`local_today`] supplies it from the wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Task;
use crate::error::ValidationError;

/// Today's date on the local wall clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Relative due-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    /// Monday-start ISO week containing today.
    Week,
    Month,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        }
    }

    /// Whether `day` falls inside this window relative to `today`.
    pub fn contains(self, day: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Today => day == today,
            TimeWindow::Week => {
                let (start, end) = week_bounds(today);
                start <= day && day <= end
            }
            TimeWindow::Month => day.year() == today.year() && day.month() == today.month(),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "today" => Ok(TimeWindow::Today),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            other => Err(ValidationError::InvalidValue {
                field: "window".into(),
                message: format!("'{other}' is not one of all, today, week, month"),
            }),
        }
    }
}

/// First (Monday) and last (Sunday) day of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (start, start + Duration::days(6))
}

/// Tasks due on `date`.
pub fn filter_by_exact_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_day() == Some(date))
        .collect()
}

/// Tasks whose due date falls in `window`. Every window except `All`
/// drops tasks without a parseable due date.
pub fn filter_by_window(tasks: &[Task], window: TimeWindow, today: NaiveDate) -> Vec<&Task> {
    if window == TimeWindow::All {
        return tasks.iter().collect();
    }
    tasks
        .iter()
        .filter(|t| t.due_day().is_some_and(|d| window.contains(d, today)))
        .collect()
}

/// Filter selection of a task list view.
///
/// A selected calendar date takes precedence over the window. Picking a date
/// resets the window to `All`; picking a window clears the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    selected_date: Option<NaiveDate>,
    window: TimeWindow,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        self.window = TimeWindow::All;
    }

    pub fn select_window(&mut self, window: TimeWindow) {
        self.window = window;
        self.selected_date = None;
    }

    pub fn apply<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        match self.selected_date {
            Some(date) => filter_by_exact_date(tasks, date),
            None => filter_by_window(tasks, self.window, today),
        }
    }
}

/// Same precedence as [`TaskFilter::apply`] for callers that hold both
/// inputs separately: a selected date wins over any window.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    selected_date: Option<NaiveDate>,
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<&'a Task> {
    match selected_date {
        Some(date) => filter_by_exact_date(tasks, date),
        None => filter_by_window(tasks, window, today),
    }
}

/// Due-date classification shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusBadge {
    /// Completed tasks carry no badge.
    None,
    NoDueDate,
    Invalid,
    Overdue,
    DueToday,
    Upcoming,
}

impl StatusBadge {
    pub fn label(self) -> Option<&'static str> {
        match self {
            StatusBadge::None => None,
            StatusBadge::NoDueDate => Some("No Due Date"),
            StatusBadge::Invalid => Some("Invalid Date"),
            StatusBadge::Overdue => Some("Overdue"),
            StatusBadge::DueToday => Some("Due Today"),
            StatusBadge::Upcoming => Some("Upcoming"),
        }
    }
}

pub fn status_badge(task: &Task, today: NaiveDate) -> StatusBadge {
    if task.completed {
        return StatusBadge::None;
    }
    let Some(due) = task.due_date.as_ref() else {
        return StatusBadge::NoDueDate;
    };
    match due.date() {
        None => StatusBadge::Invalid,
        Some(day) if day < today => StatusBadge::Overdue,
        Some(day) if day == today => StatusBadge::DueToday,
        Some(_) => StatusBadge::Upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::DueDate;
    use chrono::Utc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, due: Option<&str>) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            due_date: due.map(DueDate::new),
            completed: false,
            created_at: Utc::now(),
        }
    }

    fn ids(tasks: Vec<&Task>) -> Vec<i64> {
        tasks.into_iter().map(|t| t.id).collect()
    }

    // 2026-10-21 is a Wednesday.
    const TODAY: (i32, u32, u32) = (2026, 10, 21);

    fn today() -> NaiveDate {
        day(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn week_bounds_start_on_monday() {
        assert_eq!(week_bounds(today()), (day(2026, 10, 19), day(2026, 10, 25)));
        // A Sunday belongs to the week that started six days earlier.
        assert_eq!(week_bounds(day(2026, 10, 25)).0, day(2026, 10, 19));
        // A Monday starts its own week.
        assert_eq!(week_bounds(day(2026, 10, 26)).0, day(2026, 10, 26));
    }

    #[test]
    fn exact_date_matches_calendar_day() {
        let tasks = vec![
            task(1, Some("2026-10-21")),
            task(2, Some("2026-10-21T23:15")),
            task(3, Some("2026-10-22")),
            task(4, None),
            task(5, Some("garbage")),
        ];
        assert_eq!(ids(filter_by_exact_date(&tasks, today())), vec![1, 2]);
    }

    #[test]
    fn windows_exclude_missing_and_invalid_dates() {
        let tasks = vec![
            task(1, Some("2026-10-21")),
            task(2, Some("2026-10-19")),
            task(3, Some("2026-10-26")),
            task(4, Some("2026-10-01")),
            task(5, Some("2025-10-21")),
            task(6, None),
            task(7, Some("garbage")),
        ];
        let t = today();
        assert_eq!(ids(filter_by_window(&tasks, TimeWindow::All, t)), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(ids(filter_by_window(&tasks, TimeWindow::Today, t)), vec![1]);
        assert_eq!(ids(filter_by_window(&tasks, TimeWindow::Week, t)), vec![1, 2]);
        assert_eq!(ids(filter_by_window(&tasks, TimeWindow::Month, t)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn selected_date_overrides_window() {
        let tasks = vec![task(1, Some("2026-10-21")), task(2, Some("2026-11-30"))];
        let outside_week = day(2026, 11, 30);
        assert_eq!(
            ids(filter_tasks(&tasks, Some(outside_week), TimeWindow::Week, today())),
            vec![2]
        );
        assert_eq!(ids(filter_tasks(&tasks, None, TimeWindow::Week, today())), vec![1]);
    }

    #[test]
    fn filter_selection_rules() {
        let mut filter = TaskFilter::new();
        filter.select_window(TimeWindow::Week);
        filter.select_date(day(2026, 11, 30));
        assert_eq!(filter.window(), TimeWindow::All);
        assert_eq!(filter.selected_date(), Some(day(2026, 11, 30)));

        filter.select_window(TimeWindow::Month);
        assert_eq!(filter.selected_date(), None);
        assert_eq!(filter.window(), TimeWindow::Month);
    }

    #[test]
    fn parse_window_names() {
        assert_eq!("Week".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
        assert_eq!(" today ".parse::<TimeWindow>().unwrap(), TimeWindow::Today);
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn status_badges() {
        let t = today();
        let mut done = task(1, Some("2020-01-01"));
        done.completed = true;
        assert_eq!(status_badge(&done, t), StatusBadge::None);
        assert_eq!(status_badge(&task(2, None), t), StatusBadge::NoDueDate);
        assert_eq!(status_badge(&task(3, Some("soon")), t), StatusBadge::Invalid);
        assert_eq!(status_badge(&task(4, Some("2026-10-20")), t), StatusBadge::Overdue);
        assert_eq!(status_badge(&task(5, Some("2026-10-21")), t), StatusBadge::DueToday);
        assert_eq!(status_badge(&task(6, Some("2026-10-22")), t), StatusBadge::Upcoming);
        assert_eq!(StatusBadge::Invalid.label(), Some("Invalid Date"));
        assert_eq!(StatusBadge::None.label(), None);
    }
}
