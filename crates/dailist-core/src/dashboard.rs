//! Task-side application state: the task store, the streak, and the list
//! filter, wired together the way the task view uses them.

use chrono::NaiveDate;

use crate::stats::{weekly_stats, WeeklyStats};
use crate::storage::KvStore;
use crate::streak::{StreakState, StreakTracker};
use crate::task::query::{local_today, status_badge, StatusBadge, TaskFilter, TimeWindow};
use crate::task::{DueDate, Task, TaskStore};

pub struct Dashboard<S> {
    tasks: TaskStore<S>,
    streak: StreakTracker<S>,
    filter: TaskFilter,
    clock: fn() -> NaiveDate,
}

impl<S: KvStore + Clone> Dashboard<S> {
    /// Load tasks and reconcile the streak against the local date.
    pub fn open(kv: S) -> Self {
        Self::with_clock(kv, local_today)
    }

    pub fn with_clock(kv: S, clock: fn() -> NaiveDate) -> Self {
        let tasks = TaskStore::load(kv.clone());
        let streak = StreakTracker::open(kv, clock());
        Self {
            tasks,
            streak,
            filter: TaskFilter::default(),
            clock,
        }
    }
}

impl<S: KvStore> Dashboard<S> {
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.tasks
    }

    pub fn streak(&self) -> u32 {
        self.streak.current()
    }

    pub fn streak_state(&self) -> StreakState {
        self.streak.state()
    }

    pub fn add_task(&mut self, text: &str, due_date: Option<DueDate>) -> &[Task] {
        self.tasks.add(text, due_date);
        self.after_change()
    }

    pub fn remove_task(&mut self, id: i64) -> &[Task] {
        self.tasks.remove(id);
        self.after_change()
    }

    pub fn edit_task(&mut self, id: i64, new_text: &str) -> &[Task] {
        self.tasks.edit_text(id, new_text);
        self.after_change()
    }

    pub fn toggle_task(&mut self, id: i64) -> &[Task] {
        self.tasks.toggle_completed(id);
        self.after_change()
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Calendar pick; resets the window to `All`.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.filter.select_date(date);
    }

    /// Window pick; clears the calendar date.
    pub fn select_window(&mut self, window: TimeWindow) {
        self.filter.select_window(window);
    }

    /// Tasks matching the current filter.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(self.tasks.tasks(), self.today())
    }

    pub fn weekly_stats(&self) -> WeeklyStats {
        weekly_stats(self.tasks.tasks(), self.today())
    }

    pub fn badge(&self, task: &Task) -> StatusBadge {
        status_badge(task, self.today())
    }

    fn after_change(&mut self) -> &[Task] {
        self.streak.reconcile((self.clock)());
        self.tasks.tasks()
    }
}
