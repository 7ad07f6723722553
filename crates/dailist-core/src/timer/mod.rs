mod display;
mod machine;
mod mode;
mod ticker;

pub use display::{format_clock, SessionDot};
pub use machine::{Notification, PomodoroMachine, MAX_TITLE_CHARS};
pub use mode::{Mode, TimerSettings};
pub use ticker::Ticker;
