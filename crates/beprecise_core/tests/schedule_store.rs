use beprecise_core::{
    DocumentKind, DocumentRepository, JsonFileRepository, Schedule, ScheduleStore, Slot,
    SlotDuration, StoreError, ValidationError, DAY_BUDGET_MINUTES,
};

const DAY: &str = "2024-01-01";

#[test]
fn allocation_scenario_standup_and_focus() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);

    store.set_slot(DAY, 9, "Standup", "15").unwrap();
    store.set_slot(DAY, 14, "Focus", "120").unwrap();

    assert_eq!(store.total_allocated(DAY), 135);
    assert_eq!(store.remaining_budget(DAY), 1305);

    let day = store.get_day(DAY);
    assert_eq!(day.len(), 2);
    assert_eq!(
        day.get("09:00"),
        Some(&Slot {
            task: "Standup".to_string(),
            duration: SlotDuration::Minutes(15),
        })
    );
    assert!(day.contains_key("14:00"));
}

#[test]
fn empty_task_or_zero_duration_clears_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);

    store.set_slot(DAY, 8, "Gym", "60").unwrap();
    assert_eq!(store.set_slot(DAY, 8, "", "0").unwrap(), None);
    assert!(!store.get_day(DAY).contains_key("08:00"));

    store.set_slot(DAY, 8, "Gym", "60").unwrap();
    assert_eq!(store.set_slot(DAY, 8, "task", "0").unwrap(), None);
    assert!(!store.get_day(DAY).contains_key("08:00"));

    store.set_slot(DAY, 8, "Gym", "60").unwrap();
    store.set_slot(DAY, 8, "Gym", "-15").unwrap();
    store.set_slot(DAY, 10, "  ", "30").unwrap();
    store.set_slot(DAY, 11, "Lunch", " ").unwrap();
    assert!(store.get_day(DAY).is_empty());
    assert_eq!(store.total_allocated(DAY), 0);
}

#[test]
fn invalid_input_is_rejected_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);
    store.set_slot(DAY, 9, "Standup", "15").unwrap();

    assert!(matches!(
        store.set_slot(DAY, 9, "Standup", "fifteen").unwrap_err(),
        StoreError::Validation(ValidationError::InvalidDuration(_))
    ));
    assert!(matches!(
        store.set_slot(DAY, 24, "Late", "15").unwrap_err(),
        StoreError::Validation(ValidationError::InvalidHour(24))
    ));
    assert!(matches!(
        store.set_slot("01/01/2024", 9, "Standup", "15").unwrap_err(),
        StoreError::Validation(ValidationError::InvalidDate(_))
    ));

    assert_eq!(store.total_allocated(DAY), 15);
    assert_eq!(store.dates(), vec![DAY]);
}

#[test]
fn over_booking_is_reported_not_capped() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);

    store.set_slot(DAY, 0, "Sleep", "900").unwrap();
    store.set_slot(DAY, 15, "Work", "600").unwrap();

    let allocation = store.allocation(DAY);
    assert_eq!(allocation.allocated, 1500);
    assert_eq!(allocation.remaining, -60);
    assert!(allocation.is_over_booked());
    assert_eq!(store.remaining_budget(DAY), -60);
}

#[test]
fn huge_allocations_saturate_instead_of_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);

    store.set_slot(DAY, 9, "Marathon", &i64::MAX.to_string()).unwrap();
    store.set_slot(DAY, 10, "Encore", "1").unwrap();

    assert_eq!(store.total_allocated(DAY), i64::MAX);
    assert_eq!(store.remaining_budget(DAY), DAY_BUDGET_MINUTES - i64::MAX);
    assert!(store.allocation(DAY).is_over_booked());
}

#[test]
fn large_negative_stored_durations_do_not_overflow_the_budget() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let document = serde_json::json!({
        DAY: {
            "09:00": { "task": "Odd", "duration": i64::MIN },
            "10:00": { "task": "Odder", "duration": i64::MIN }
        }
    });
    repo.write_document(DocumentKind::Schedule, &document.to_string())
        .unwrap();

    let store = ScheduleStore::open(&repo);
    assert_eq!(store.total_allocated(DAY), i64::MIN);
    assert_eq!(store.remaining_budget(DAY), i64::MAX);
}

#[test]
fn budget_accounting_always_sums_to_a_day() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);

    for (hour, minutes) in [(6, "30"), (7, "45"), (12, "60"), (20, "2000")] {
        store.set_slot(DAY, hour, "Block", minutes).unwrap();
        assert_eq!(
            store.total_allocated(DAY) + store.remaining_budget(DAY),
            DAY_BUDGET_MINUTES
        );
    }
    assert_eq!(store.total_allocated("2030-12-31"), 0);
    assert_eq!(store.remaining_budget("2030-12-31"), DAY_BUDGET_MINUTES);
    assert!(store.get_day("2030-12-31").is_empty());
}

#[test]
fn schedule_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);
    store.set_slot("2024-01-02", 9, "Standup", "15").unwrap();
    store.set_slot(DAY, 13, "Review", "45").unwrap();

    let reopened = ScheduleStore::open(&repo);
    assert_eq!(reopened.schedule(), store.schedule());
    assert_eq!(reopened.dates(), vec![DAY, "2024-01-02"]);

    let body = repo.read_document(DocumentKind::Schedule).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[DAY]["13:00"]["task"], "Review");
    assert_eq!(json[DAY]["13:00"]["duration"], 45);
}

#[test]
fn legacy_text_durations_and_corrupt_entries_load_tolerantly() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let document = serde_json::json!({
        "2024-01-01": {
            "09:00": { "task": "Standup", "duration": "15" },
            "10:00": { "task": "Broken", "duration": "abc" },
            "11:00": { "task": "Email", "duration": 20 },
            "noon": { "task": "Lunch", "duration": "60" }
        },
        "2024-01-02": "not a day"
    });
    repo.write_document(DocumentKind::Schedule, &document.to_string())
        .unwrap();

    let store = ScheduleStore::open(&repo);
    assert_eq!(store.dates(), vec![DAY]);
    assert_eq!(store.get_day(DAY).len(), 3);
    assert_eq!(store.total_allocated(DAY), 35);
}

#[test]
fn one_malformed_slot_does_not_drop_the_rest_of_its_day() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let document = serde_json::json!({
        DAY: {
            "09:00": { "task": "Standup", "duration": "15" },
            "10:00": { "task": "Focus", "duration": 120 },
            "11:00": { "task": "Fraction", "duration": 30.5 },
            "12:00": { "task": "Nothing", "duration": null },
            "13:00": { "task": 42, "duration": 60 },
            "14:00": "not a slot"
        }
    });
    repo.write_document(DocumentKind::Schedule, &document.to_string())
        .unwrap();

    let mut store = ScheduleStore::open(&repo);
    assert_eq!(store.total_allocated(DAY), 135);
    let day = store.get_day(DAY);
    assert_eq!(day.len(), 4);
    assert!(day.contains_key("11:00"));
    assert!(!day.contains_key("13:00"));

    store.set_slot("2024-01-02", 8, "Walk", "10").unwrap();

    let body = repo.read_document(DocumentKind::Schedule).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[DAY]["09:00"]["duration"], "15");
    assert_eq!(json[DAY]["10:00"]["duration"], 120);
    assert_eq!(json[DAY]["11:00"]["duration"], 30.5);
    assert_eq!(json["2024-01-02"]["08:00"]["task"], "Walk");
}

#[test]
fn read_paths_resolve_dates_like_set_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let mut store = ScheduleStore::open(&repo);
    store.set_slot(" 2024-01-01 ", 9, "Standup", "15").unwrap();

    assert_eq!(store.dates(), vec![DAY]);
    assert_eq!(store.get_day("  2024-01-01").len(), 1);
    assert_eq!(store.total_allocated("2024-01-01\n"), 15);
    assert_eq!(store.total_allocated("2024-1-1"), 0);
    assert!(store.get_day("tomorrow").is_empty());
}

#[test]
fn corrupt_document_loads_empty_and_save_replaces_it() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    repo.write_document(DocumentKind::Schedule, "<<<").unwrap();

    let mut store = ScheduleStore::open(&repo);
    assert!(store.schedule().is_empty());

    let mut schedule = Schedule::new();
    schedule.entry(DAY.to_string()).or_default().insert(
        "07:00".to_string(),
        Slot {
            task: "Walk".to_string(),
            duration: SlotDuration::Text("30".to_string()),
        },
    );
    store.save(schedule.clone()).unwrap();

    let reopened = ScheduleStore::open(&repo);
    assert_eq!(reopened.schedule(), &schedule);
    assert_eq!(reopened.total_allocated(DAY), 30);
}
