use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Fixed length of this mode in the standard cycle, in seconds.
    pub const fn default_duration_secs(self) -> u64 {
        match self {
            Mode::Work => 25 * 60,
            Mode::ShortBreak => 5 * 60,
            Mode::LongBreak => 15 * 60,
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Mode::Work)
    }

    /// Heading shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Focus Time",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

/// Durations and cycle parameters for [`super::PomodoroMachine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// Work sessions per cycle; the last one is followed by a long break.
    pub sessions_per_cycle: u32,
    /// How long a transition banner stays visible.
    pub notification_secs: i64,
    /// Title assigned when the user skips the prompt or submits a blank one.
    pub default_title: String,
}

impl TimerSettings {
    pub fn duration_secs(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_secs,
            Mode::ShortBreak => self.short_break_secs,
            Mode::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_secs: Mode::Work.default_duration_secs(),
            short_break_secs: Mode::ShortBreak.default_duration_secs(),
            long_break_secs: Mode::LongBreak.default_duration_secs(),
            sessions_per_cycle: 4,
            notification_secs: 4,
            default_title: "Untitled Session".into(),
        }
    }
}
