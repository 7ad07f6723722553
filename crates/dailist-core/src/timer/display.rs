//! Text and progress helpers for rendering the session machine.

use serde::{Deserialize, Serialize};

use super::machine::PomodoroMachine;
use super::mode::Mode;

/// State of one dot in the per-cycle session strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionDot {
    Completed,
    Current,
    Pending,
}

/// Format seconds as `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl PomodoroMachine {
    /// Caption describing where we are in the cycle.
    pub fn cycle_caption(&self) -> String {
        match self.mode() {
            Mode::Work => format!(
                "Session {} of {}",
                self.current_session_index(),
                self.settings().sessions_per_cycle
            ),
            Mode::LongBreak => "Long Break - Cycle Complete!".to_string(),
            Mode::ShortBreak => format!(
                "Break after Session {}",
                self.current_session_index().saturating_sub(1)
            ),
        }
    }

    /// One dot per session in the cycle.
    ///
    /// Finished sessions of the current cycle are `Completed`; right after a
    /// full cycle every dot stays `Completed` until the next session ends.
    pub fn session_dots(&self) -> Vec<SessionDot> {
        let per_cycle = self.settings().sessions_per_cycle.max(1);
        let done_in_cycle = self.sessions_completed() % per_cycle;
        let cycle_just_finished = done_in_cycle == 0 && self.sessions_completed() > 0;

        (1..=per_cycle)
            .map(|session| {
                if session <= done_in_cycle || cycle_just_finished {
                    SessionDot::Completed
                } else if session == self.current_session_index() && self.mode() == Mode::Work {
                    SessionDot::Current
                } else {
                    SessionDot::Pending
                }
            })
            .collect()
    }
}
