//! Interactive Pomodoro session.
//!
//! Reads one command per line from stdin and prints every resulting event as
//! a line of JSON. The ticker runs only while the machine is running.

use chrono::Utc;
use dailist_core::{Config, Event, PomodoroMachine, Ticker};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Start,
    Pause,
    Reset,
    Title(String),
    Skip,
    Status,
    Quit,
}

fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match word.to_ascii_lowercase().as_str() {
        "start" => SessionCommand::Start,
        "pause" => SessionCommand::Pause,
        "reset" => SessionCommand::Reset,
        "title" => SessionCommand::Title(rest.trim().to_string()),
        "skip" => SessionCommand::Skip,
        "status" => SessionCommand::Status,
        "quit" | "exit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn emit(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Config::load_or_default().timer_settings();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(PomodoroMachine::with_settings(settings)))
}

async fn session(mut machine: PomodoroMachine) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = Ticker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    emit(&machine.snapshot())?;

    loop {
        tokio::select! {
            Some(()) = ticker.recv() => {
                machine.prune_notification(Utc::now());
                if let Some(event) = machine.tick() {
                    emit(&event)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed; ending session");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let Some(command) = parse_command(&line) else {
                    eprintln!("unknown command: {}", line.trim());
                    continue;
                };
                let event = match command {
                    SessionCommand::Start => machine.start(),
                    SessionCommand::Pause => machine.pause(),
                    SessionCommand::Reset => machine.reset(),
                    SessionCommand::Title(title) => machine.submit_title(&title),
                    SessionCommand::Skip => machine.skip_title(),
                    SessionCommand::Status => None,
                    SessionCommand::Quit => break,
                };
                emit(&event.unwrap_or_else(|| machine.snapshot()))?;
            }
        }
        ticker.sync(machine.is_running());
    }

    ticker.stop();
    Ok(())
}
