//! # Dailist Core Library
//!
//! Core logic for Dailist, a daily task tracker with a Pomodoro timer. The
//! `dailist` CLI is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Tasks**: a persisted task list with date-window queries and status
//!   badges
//! - **Stats / Streak**: weekly completion summary and the daily-open streak
//! - **Timer**: a Pomodoro session machine advanced one second per `tick()`,
//!   plus a cancellable tokio ticker to drive it
//! - **Storage**: SQLite key/value records and TOML configuration
//!
//! ## Key Components
//!
//! - [`TaskStore`]: task list bound to a [`KvStore`]
//! - [`StreakTracker`]: consecutive-day open counter
//! - [`PomodoroMachine`]: work/break session state machine
//! - [`Dashboard`]: tasks, streak and filter wired together
//! - [`Database`] / [`Config`]: persistence and configuration

pub mod dashboard;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod task;
pub mod timer;

pub use dashboard::Dashboard;
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use stats::{weekly_stats, WeeklyStats};
pub use storage::{Config, Database, KvStore};
pub use streak::{StreakState, StreakTracker};
pub use task::query::{StatusBadge, TaskFilter, TimeWindow};
pub use task::{DueDate, Task, TaskStore};
pub use timer::{Mode, PomodoroMachine, Ticker, TimerSettings};
