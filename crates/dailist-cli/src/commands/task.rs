//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use dailist_core::{Dashboard, Database, DueDate, StatusBadge, Task, TimeWindow};
use serde::Serialize;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Time window: all, today, week or month
        #[arg(long, default_value = "all")]
        window: TimeWindow,
        /// Exact due date (YYYY-MM-DD); takes precedence over --window
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace a task's text
    Edit {
        /// Task ID
        id: i64,
        /// New text
        text: String,
    },
    /// Flip a task between pending and completed
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

/// A task as printed by `task list`, with its badge and short due label.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskView<'a> {
    #[serde(flatten)]
    task: &'a Task,
    status: StatusBadge,
    badge: Option<&'static str>,
    due_label: Option<String>,
}

impl<'a> TaskView<'a> {
    fn new(task: &'a Task, status: StatusBadge) -> Self {
        Self {
            task,
            status,
            badge: status.label(),
            due_label: task.due_label(),
        }
    }
}

fn ensure_saved(dashboard: &Dashboard<&Database>) -> Result<(), Box<dyn std::error::Error>> {
    if dashboard.store().is_dirty() {
        return Err("failed to save tasks".into());
    }
    Ok(())
}

fn ensure_exists(dashboard: &Dashboard<&Database>, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    if dashboard.store().get(id).is_none() {
        return Err(format!("no task with id {id}").into());
    }
    Ok(())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut dashboard = Dashboard::open(&db);

    match action {
        TaskAction::Add { text, due } => {
            let before = dashboard.tasks().len();
            let tasks = dashboard.add_task(&text, due.map(DueDate::new));
            if tasks.len() == before {
                return Err("task text must not be empty".into());
            }
            let task = tasks[tasks.len() - 1].clone();
            ensure_saved(&dashboard)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { window, date } => {
            dashboard.select_window(window);
            if let Some(date) = date {
                dashboard.select_date(date);
            }
            let views: Vec<TaskView> = dashboard
                .visible_tasks()
                .into_iter()
                .map(|task| TaskView::new(task, dashboard.badge(task)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        TaskAction::Edit { id, text } => {
            ensure_exists(&dashboard, id)?;
            if text.trim().is_empty() {
                return Err("task text must not be empty".into());
            }
            dashboard.edit_task(id, &text);
            ensure_saved(&dashboard)?;
            println!("{}", serde_json::to_string_pretty(&dashboard.store().get(id))?);
        }
        TaskAction::Toggle { id } => {
            ensure_exists(&dashboard, id)?;
            dashboard.toggle_task(id);
            ensure_saved(&dashboard)?;
            println!("{}", serde_json::to_string_pretty(&dashboard.store().get(id))?);
        }
        TaskAction::Delete { id } => {
            ensure_exists(&dashboard, id)?;
            dashboard.remove_task(id);
            ensure_saved(&dashboard)?;
            println!("{}", serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}
