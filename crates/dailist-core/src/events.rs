use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, SessionDot};

/// Every state change of the session machine produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A work session needs a title before it can run.
    TitleRequested {
        at: DateTime<Utc>,
    },
    TitleSet {
        title: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: Mode,
        time_left_secs: u64,
        session_title: Option<String>,
        at: DateTime<Utc>,
    },
    TimerPaused {
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the machine moved to the next mode.
    SessionCompleted {
        from: Mode,
        to: Mode,
        sessions_completed: u32,
        current_session_index: u32,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        time_left_secs: u64,
        total_secs: u64,
        is_running: bool,
        awaiting_title: bool,
        sessions_completed: u32,
        current_session_index: u32,
        session_title: Option<String>,
        notification: Option<String>,
        progress: f64,
        /// Heading for the current mode (`Focus Time`, ...).
        mode_label: String,
        /// Remaining time as `MM:SS`.
        clock: String,
        cycle_caption: String,
        session_dots: Vec<SessionDot>,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
}
