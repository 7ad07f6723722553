//! Integration tests for the task store.
//!
//! Covers persistence across reloads on a file-backed database, the query
//! engine over stored tasks, and property checks on the mutation rules.

use chrono::NaiveDate;
use dailist_core::task::query::filter_tasks;
use dailist_core::{
    weekly_stats, Database, DueDate, KvStore, StatusBadge, TaskFilter, TaskStore, TimeWindow,
};
use proptest::prelude::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_tasks_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dailist.db");

    let (kept, dropped) = {
        let db = Database::open_at(&path).unwrap();
        let mut store = TaskStore::load(&db);
        store.add("Write report", Some(DueDate::new("2026-10-21")));
        store.add("Water plants", None);
        let dropped = store.add("Cancel gym", None)[2].id;
        let kept = store.tasks()[0].id;
        store.toggle_completed(kept);
        store.edit_text(kept, "Write quarterly report");
        store.remove(dropped);
        (kept, dropped)
    };

    let db = Database::open_at(&path).unwrap();
    let store = TaskStore::load(&db);
    assert_eq!(store.tasks().len(), 2);
    assert!(store.get(dropped).is_none());

    let task = store.get(kept).unwrap();
    assert_eq!(task.text, "Write quarterly report");
    assert!(task.completed);
    assert_eq!(task.due_day(), Some(day(2026, 10, 21)));
}

#[test]
fn test_stored_document_shape() {
    let db = Database::open_memory().unwrap();
    let mut store = TaskStore::load(&db);
    store.add("Buy milk", Some(DueDate::new("2026-10-19")));

    let raw = db.get("todos").unwrap().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let todo = &doc["todos"][0];
    assert_eq!(todo["text"], "Buy milk");
    assert_eq!(todo["dueDate"], "2026-10-19");
    assert_eq!(todo["completed"], false);
    assert!(todo["id"].is_i64());
    assert!(todo["createdAt"].is_string());
}

#[test]
fn test_query_engine_over_store() {
    // Wednesday 2026-10-21; the week runs Mon 19th to Sun 25th.
    let today = day(2026, 10, 21);
    let db = Database::open_memory().unwrap();
    let mut store = TaskStore::load(&db);
    store.add("Monday standup", Some(DueDate::new("2026-10-19")));
    store.add("Wednesday review", Some(DueDate::new("2026-10-21")));
    store.add("Friday demo", Some(DueDate::new("2026-10-23")));
    store.add("Next month", Some(DueDate::new("2026-11-05")));
    store.add("No date", None);

    let ids: Vec<i64> = store.tasks().iter().map(|t| t.id).collect();
    store.toggle_completed(ids[0]);
    store.toggle_completed(ids[1]);

    let tasks = store.tasks();
    assert_eq!(filter_tasks(tasks, None, TimeWindow::All, today).len(), 5);
    assert_eq!(filter_tasks(tasks, None, TimeWindow::Today, today).len(), 1);
    assert_eq!(filter_tasks(tasks, None, TimeWindow::Week, today).len(), 3);
    assert_eq!(filter_tasks(tasks, None, TimeWindow::Month, today).len(), 3);

    let mut filter = TaskFilter::new();
    filter.select_window(TimeWindow::Week);
    filter.select_date(day(2026, 11, 5));
    let visible = filter.apply(tasks, today);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].text, "Next month");

    let stats = weekly_stats(tasks, today);
    assert_eq!(
        (stats.completed, stats.remaining, stats.completion_rate),
        (2, 1, 67)
    );

    let badges: Vec<StatusBadge> = tasks
        .iter()
        .map(|t| dailist_core::task::query::status_badge(t, today))
        .collect();
    assert_eq!(
        badges,
        vec![
            StatusBadge::None,
            StatusBadge::None,
            StatusBadge::Upcoming,
            StatusBadge::Upcoming,
            StatusBadge::NoDueDate,
        ]
    );
}

fn task_text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,30}"
}

/// No date, a real calendar date, or free text that does not parse.
fn due_date() -> impl Strategy<Value = Option<DueDate>> {
    prop_oneof![
        Just(None),
        (2000i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Some(DueDate::from(day(y, m, d)))),
        "[a-z][a-z ]{0,11}".prop_map(|raw| Some(DueDate::new(raw))),
    ]
}

proptest! {
    #[test]
    fn prop_added_tasks_reload_identically(
        entries in prop::collection::vec((task_text(), due_date()), 1..12)
    ) {
        let db = Database::open_memory().unwrap();
        let mut store = TaskStore::load(&db);
        for (text, due) in &entries {
            store.add(text, due.clone());
        }
        let before = store.tasks().to_vec();
        let reloaded = TaskStore::load(&db);
        prop_assert_eq!(reloaded.tasks(), before.as_slice());

        for (task, (text, due)) in reloaded.tasks().iter().zip(&entries) {
            prop_assert_eq!(&task.text, text.trim());
            prop_assert_eq!(&task.due_date, due);
            prop_assert!(!task.completed);
        }

        let mut ids: Vec<i64> = before.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn prop_toggle_is_an_involution(count in 1usize..8, pick in 0usize..8) {
        let db = Database::open_memory().unwrap();
        let mut store = TaskStore::load(&db);
        for i in 0..count {
            store.add(&format!("task {i}"), None);
        }
        let before = store.tasks().to_vec();
        let id = before[pick % count].id;
        store.toggle_completed(id);
        store.toggle_completed(id);
        prop_assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn prop_blank_text_never_adds(spaces in "[ \t]{0,10}") {
        let db = Database::open_memory().unwrap();
        let mut store = TaskStore::load(&db);
        prop_assert!(store.add(&spaces, None).is_empty());
        prop_assert!(db.get("todos").unwrap().is_none());
    }
}
