use beprecise_core::{summarize, Cadence, FixedClock, JsonFileRepository, TaskMap, TaskStore};
use chrono::NaiveDate;

fn store(dir: &std::path::Path) -> TaskStore<JsonFileRepository, FixedClock> {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    TaskStore::open_with_clock(JsonFileRepository::in_dir(dir), FixedClock(today))
}

#[test]
fn empty_map_keeps_all_three_categories() {
    let summary = summarize(&TaskMap::new());
    let categories: Vec<Cadence> = summary.keys().copied().collect();
    assert_eq!(
        categories,
        vec![Cadence::Daily, Cadence::Weekly, Cadence::Monthly]
    );
    assert!(summary.values().all(Vec::is_empty));
}

#[test]
fn rows_are_grouped_by_cadence_in_task_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(dir.path());
    store.add("Stretch", 20, "2024-01-05", Cadence::Daily).unwrap();
    store.add("Report", 120, "2024-01-14", Cadence::Weekly).unwrap();
    store.add("Meditate", 10, "2024-01-05", Cadence::Daily).unwrap();
    store.add("Novel", 600, "2024-03-01", Cadence::Monthly).unwrap();
    store.log_progress("Report", 30).unwrap();

    let summary = summarize(store.tasks());
    let daily: Vec<&str> = summary[&Cadence::Daily]
        .iter()
        .map(|row| row.title.as_str())
        .collect();
    assert_eq!(daily, vec!["Stretch", "Meditate"]);

    let report = &summary[&Cadence::Weekly][0];
    assert_eq!(report.completed_minutes, 30);
    assert_eq!(report.total_minutes, 120);
    assert_eq!(report.progress_percent, 25.0);
    assert!(!report.over_completed);

    assert_eq!(summary[&Cadence::Monthly].len(), 1);
}

#[test]
fn progress_is_capped_and_over_completion_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(dir.path());
    store.add("Run", 60, "2024-01-05", Cadence::Daily).unwrap();
    store.log_progress("Run", 90).unwrap();

    let summary = summarize(store.tasks());
    let row = &summary[&Cadence::Daily][0];
    assert_eq!(row.completed_minutes, 90);
    assert_eq!(row.progress_percent, 100.0);
    assert!(row.over_completed);
}

#[test]
fn zero_total_reports_zero_progress() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("data.json"),
        r#"{ "Legacy": { "minutes": 0, "completed_minutes": 15 } }"#,
    )
    .unwrap();

    let store = store(dir.path());
    let summary = summarize(store.tasks());
    let row = &summary[&Cadence::Daily][0];
    assert_eq!(row.total_minutes, 0);
    assert_eq!(row.progress_percent, 0.0);
}
