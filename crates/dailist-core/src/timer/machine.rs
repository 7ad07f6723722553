//! Pomodoro session machine.
//!
//! The machine holds no clock. The caller invokes `tick()` once per elapsed
//! second while `is_running()` is true (see [`super::Ticker`]).
//!
//! ## Cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ShortBreak -> Work -> ShortBreak -> Work -> LongBreak -> Work ...
//! ```
//!
//! Each transition stops the countdown and posts a short-lived notification.
//! A work session only runs once it has a title; after a break the title is
//! cleared and the prompt reopens.
//!
//! ## Usage
//!
//! ```ignore
//! let mut machine = PomodoroMachine::new();
//! machine.start();              // Some(Event::TitleRequested)
//! machine.submit_title("Draft"); // running
//! machine.tick();               // once per second
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::display::format_clock;
use super::mode::{Mode, TimerSettings};
use crate::events::Event;

/// Longest title kept from the prompt, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Transient banner describing the last transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroMachine {
    settings: TimerSettings,
    mode: Mode,
    /// Seconds left in the current mode.
    time_left: u64,
    is_running: bool,
    sessions_completed: u32,
    /// 1-based position within the current cycle.
    current_session_index: u32,
    session_title: Option<String>,
    awaiting_title: bool,
    notification: Option<Notification>,
}

impl Default for PomodoroMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroMachine {
    /// A machine on the standard 25/5/15 cycle, idle at the start of work.
    pub fn new() -> Self {
        Self::with_settings(TimerSettings::default())
    }

    pub fn with_settings(settings: TimerSettings) -> Self {
        let time_left = settings.duration_secs(Mode::Work);
        Self {
            settings,
            mode: Mode::Work,
            time_left,
            is_running: false,
            sessions_completed: 0,
            current_session_index: 1,
            session_title: None,
            awaiting_title: false,
            notification: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn current_session_index(&self) -> u32 {
        self.current_session_index
    }

    pub fn session_title(&self) -> Option<&str> {
        self.session_title.as_deref()
    }

    /// True while the title prompt is open.
    pub fn is_awaiting_title(&self) -> bool {
        self.awaiting_title
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Full length of the current mode in seconds.
    pub fn mode_duration(&self) -> u64 {
        self.settings.duration_secs(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current mode.
    pub fn progress(&self) -> f64 {
        let total = self.mode_duration();
        if total == 0 {
            return 0.0;
        }
        (total - self.time_left.min(total)) as f64 / total as f64
    }

    /// Full cycles finished so far.
    pub fn cycles_completed(&self) -> u32 {
        self.sessions_completed / self.settings.sessions_per_cycle.max(1)
    }

    /// The current banner, if it has not expired yet.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification_at(Utc::now())
    }

    pub fn notification_at(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|n| n.is_visible_at(now))
    }

    /// Drop the banner once its display window has passed.
    pub fn prune_notification(&mut self, now: DateTime<Utc>) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| !n.is_visible_at(now))
        {
            self.notification = None;
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let now = Utc::now();
        Event::StateSnapshot {
            mode: self.mode,
            time_left_secs: self.time_left,
            total_secs: self.mode_duration(),
            is_running: self.is_running,
            awaiting_title: self.awaiting_title,
            sessions_completed: self.sessions_completed,
            current_session_index: self.current_session_index,
            session_title: self.session_title.clone(),
            notification: self.notification_at(now).map(|n| n.message.clone()),
            progress: self.progress(),
            mode_label: self.mode.label().to_string(),
            clock: format_clock(self.time_left),
            cycle_caption: self.cycle_caption(),
            session_dots: self.session_dots(),
            cycles_completed: self.cycles_completed(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown, or open the title prompt for an untitled work
    /// session.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        if self.mode == Mode::Work && self.session_title.is_none() {
            self.awaiting_title = true;
            tracing::debug!("work session needs a title");
            return Some(Event::TitleRequested { at: Utc::now() });
        }
        Some(self.run())
    }

    /// Answer the title prompt. A blank title becomes the placeholder.
    pub fn submit_title(&mut self, title: &str) -> Option<Event> {
        if !self.awaiting_title {
            return None;
        }
        let trimmed = title.trim();
        let title = if trimmed.is_empty() {
            self.settings.default_title.clone()
        } else {
            trimmed.chars().take(MAX_TITLE_CHARS).collect()
        };
        self.session_title = Some(title);
        Some(self.run())
    }

    /// Dismiss the title prompt with the placeholder title.
    pub fn skip_title(&mut self) -> Option<Event> {
        if !self.awaiting_title {
            return None;
        }
        self.session_title = Some(self.settings.default_title.clone());
        Some(self.run())
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// Stop and refill the current mode. Resetting work also drops its title.
    pub fn reset(&mut self) -> Option<Event> {
        self.is_running = false;
        self.time_left = self.mode_duration();
        if self.mode == Mode::Work {
            self.session_title = None;
        }
        Some(Event::TimerReset {
            mode: self.mode,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// Call once per elapsed second. Returns `Some(Event::SessionCompleted)`
    /// when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running || self.time_left == 0 {
            return None;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            return Some(self.complete_session(Utc::now()));
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn run(&mut self) -> Event {
        self.awaiting_title = false;
        self.is_running = true;
        tracing::debug!(mode = ?self.mode, time_left = self.time_left, "timer started");
        Event::TimerStarted {
            mode: self.mode,
            time_left_secs: self.time_left,
            session_title: self.session_title.clone(),
            at: Utc::now(),
        }
    }

    fn complete_session(&mut self, now: DateTime<Utc>) -> Event {
        let from = self.mode;
        let (to, message) = match from {
            Mode::Work => {
                self.sessions_completed += 1;
                if self.sessions_completed % self.settings.sessions_per_cycle.max(1) == 0 {
                    self.current_session_index = 1;
                    (Mode::LongBreak, "Great work! Time for a long break!")
                } else {
                    self.current_session_index += 1;
                    (Mode::ShortBreak, "Work session complete! Time for a short break!")
                }
            }
            Mode::ShortBreak | Mode::LongBreak => {
                self.awaiting_title = true;
                (Mode::Work, "Break's over! Ready to focus?")
            }
        };

        self.mode = to;
        self.time_left = self.mode_duration();
        self.session_title = None;
        self.is_running = false;
        self.notification = Some(Notification {
            message: message.to_string(),
            issued_at: now,
            expires_at: now + Duration::seconds(self.settings.notification_secs),
        });

        tracing::debug!(
            ?from,
            ?to,
            sessions_completed = self.sessions_completed,
            "session completed"
        );

        Event::SessionCompleted {
            from,
            to,
            sessions_completed: self.sessions_completed,
            current_session_index: self.current_session_index,
            message: message.to_string(),
            at: now,
        }
    }
}
