//! Tasks and the persisted task store.
//!
//! The store owns the task list. Every successful mutation writes the whole
//! list as one JSON document (`{"todos": [...]}`) under [`TASKS_KEY`] and
//! returns the updated list. Guards are silent: blank text and unknown ids
//! leave the store untouched.

pub mod query;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::storage::KvStore;

/// Key under which the task list document is stored.
pub const TASKS_KEY: &str = "todos";

/// A due date as entered by the user.
///
/// The raw string is kept so that a value we cannot parse survives a round
/// trip and can be flagged instead of being silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local calendar day of this due date, or `None` if it does not parse.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to the local
    /// day) and naive `YYYY-MM-DDTHH:MM[:SS]` date-times.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Local).date_naive());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.date())
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl std::fmt::Display for DueDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Empty strings in stored data mean "no due date".
fn deserialize_due_date<'de, D>(deserializer: D) -> std::result::Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(DueDate))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (creation time in epoch milliseconds, bumped on
    /// collision).
    pub id: i64,
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DueDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Parsed due day; `None` when absent or unparseable.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.as_ref().and_then(DueDate::date)
    }

    /// Short due label (`Oct 19`) shown next to pending tasks.
    pub fn due_label(&self) -> Option<String> {
        if self.completed {
            return None;
        }
        self.due_day().map(|d| d.format("%b %d").to_string())
    }
}

#[derive(Serialize, Deserialize)]
struct TodosDocument {
    todos: Vec<Task>,
}

/// Read the task list from `kv`.
///
/// A missing or malformed document yields an empty list.
pub fn load_tasks<S: KvStore>(kv: &S) -> Vec<Task> {
    let raw = match kv.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read task list; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<TodosDocument>(&raw) {
        Ok(doc) => doc.todos,
        Err(e) => {
            tracing::warn!(error = %e, "stored task list is malformed; starting empty");
            Vec::new()
        }
    }
}

/// Write the whole task list to `kv` in one record.
///
/// # Errors
/// Returns an error if serialization or the underlying write fails; the
/// previously stored list is left in place.
pub fn save_tasks<S: KvStore>(kv: &S, tasks: &[Task]) -> Result<()> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        todos: &'a [Task],
    }
    let json = serde_json::to_string(&Borrowed { todos: tasks })?;
    kv.set(TASKS_KEY, &json)
}

/// In-memory task list backed by a [`KvStore`].
pub struct TaskStore<S> {
    kv: S,
    tasks: Vec<Task>,
    last_id: i64,
    dirty: bool,
}

impl<S: KvStore> TaskStore<S> {
    /// Load the persisted list (empty if absent or malformed).
    pub fn load(kv: S) -> Self {
        let tasks = load_tasks(&kv);
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        tracing::debug!(count = tasks.len(), "loaded tasks");
        Self {
            kv,
            tasks,
            last_id,
            dirty: false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// True when the last write failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current list. A failure is logged and leaves the list in
    /// memory untouched; the next mutation retries the full write.
    pub fn save(&mut self) -> bool {
        match save_tasks(&self.kv, &self.tasks) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist tasks");
                self.dirty = true;
                false
            }
        }
    }

    /// Add a task due on `due_date`. Blank text is ignored.
    pub fn add(&mut self, text: &str, due_date: Option<DueDate>) -> &[Task] {
        self.add_at(text, due_date, Utc::now())
    }

    /// [`TaskStore::add`] with an explicit creation time.
    pub fn add_at(&mut self, text: &str, due_date: Option<DueDate>, now: DateTime<Utc>) -> &[Task] {
        let text = text.trim();
        if text.is_empty() {
            return &self.tasks;
        }
        let id = self.next_id(now);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            due_date: due_date.filter(|d| !d.as_str().trim().is_empty()),
            completed: false,
            created_at: now,
        });
        tracing::debug!(id, "task added");
        self.save();
        &self.tasks
    }

    pub fn remove(&mut self, id: i64) -> &[Task] {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            tracing::debug!(id, "task removed");
            self.save();
        }
        &self.tasks
    }

    /// Replace a task's text. Blank text and unknown ids are ignored.
    pub fn edit_text(&mut self, id: i64, new_text: &str) -> &[Task] {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return &self.tasks;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = new_text.to_string();
            tracing::debug!(id, "task edited");
            self.save();
        }
        &self.tasks
    }

    pub fn toggle_completed(&mut self, id: i64) -> &[Task] {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            tracing::debug!(id, completed = task.completed, "task toggled");
            self.save();
        }
        &self.tasks
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
