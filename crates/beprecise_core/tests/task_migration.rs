use beprecise_core::service::migration::{migrate_document, LegacyTaskRecord};
use beprecise_core::{
    migrate, Cadence, DocumentKind, DocumentRepository, FixedClock, JsonFileRepository, Task,
    TaskRecord, TaskStore,
};
use chrono::NaiveDate;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 1, 10)
}

fn record(value: serde_json::Value) -> TaskRecord {
    TaskRecord::from_value(value).unwrap()
}

#[test]
fn current_records_are_classified_as_current() {
    let value = json!({
        "total_minutes": 120,
        "daily_minutes": 40,
        "completed_minutes": 10,
        "deadline": "2024-01-31",
        "type": "Weekly",
        "completed": false,
        "created": "2024-01-01"
    });
    let record = record(value);
    assert!(!record.is_legacy());

    let task = migrate(record, today());
    assert_eq!(task.daily_minutes, 40, "cached target must not be recomputed");
    assert_eq!(task.cadence, Cadence::Weekly);
}

#[test]
fn legacy_minutes_field_becomes_total_minutes() {
    let value = json!({ "minutes": 90, "deadline": "2024-01-20", "type": "Weekly" });
    let record = record(value);
    assert!(record.is_legacy());

    let task = migrate(record, today());
    assert_eq!(task.total_minutes, 90);
    assert_eq!(task.daily_minutes, 45);
    assert_eq!(task.completed_minutes, 0);
    assert!(!task.completed);
    assert_eq!(task.created, today());
}

#[test]
fn total_minutes_wins_over_legacy_minutes() {
    let value = json!({ "minutes": 5, "total_minutes": 60, "deadline": "2024-01-10" });
    let task = migrate(record(value), today());
    assert_eq!(task.total_minutes, 60);
    assert_eq!(task.daily_minutes, 60);
}

#[test]
fn missing_fields_take_documented_defaults() {
    let task = migrate(record(json!({})), today());
    assert_eq!(
        task,
        Task {
            total_minutes: 0,
            daily_minutes: 0,
            completed_minutes: 0,
            deadline: today(),
            cadence: Cadence::Daily,
            completed: false,
            created: today(),
        }
    );
}

#[test]
fn unparseable_deadline_and_unknown_type_fall_back() {
    let value = json!({
        "total_minutes": 30,
        "deadline": "someday",
        "type": "Yearly",
        "created": "2023-12-01"
    });
    let task = migrate(record(value), today());
    assert_eq!(task.deadline, today());
    assert_eq!(task.cadence, Cadence::Daily);
    assert_eq!(task.created, date(2023, 12, 1));
    assert_eq!(task.daily_minutes, 30);
}

#[test]
fn migrate_is_idempotent() {
    let samples = [
        json!({ "minutes": 100, "deadline": "2024-03-15", "type": "Monthly" }),
        json!({ "total_minutes": 0 }),
        json!({ "total_minutes": 45, "daily_minutes": 0, "deadline": "2023-12-01", "type": "Weekly" }),
        json!({
            "total_minutes": 120,
            "daily_minutes": 40,
            "completed_minutes": 300,
            "deadline": "2024-01-31",
            "type": "Weekly",
            "completed": true,
            "created": "2024-01-01"
        }),
    ];

    for sample in samples {
        let once = migrate(record(sample), today());
        let twice = migrate(TaskRecord::Current(once.clone()), today());
        assert_eq!(twice, once);

        let reserialized = serde_json::to_value(&once).unwrap();
        let via_document = migrate(record(reserialized), today());
        assert_eq!(via_document, once);
    }
}

#[test]
fn wrongly_typed_records_are_rejected() {
    assert!(TaskRecord::from_value(json!("not a record")).is_err());
    assert!(TaskRecord::from_value(json!({ "total_minutes": "sixty" })).is_err());
    assert_eq!(
        serde_json::from_value::<LegacyTaskRecord>(json!({})).unwrap(),
        LegacyTaskRecord::default()
    );
}

#[test]
fn fractional_minutes_are_rounded_up_instead_of_dropping_the_record() {
    let value = json!({
        "total_minutes": 120.0,
        "daily_minutes": 40,
        "completed_minutes": 12.5,
        "deadline": "2024-01-31",
        "type": "Weekly",
        "completed": true,
        "created": "2024-01-01"
    });
    let stored = record(value);
    assert!(stored.is_legacy());

    let task = migrate(stored, today());
    assert_eq!(task.total_minutes, 120);
    assert_eq!(task.daily_minutes, 40);
    assert_eq!(task.completed_minutes, 13);
    assert_eq!(task.deadline, date(2024, 1, 31));
    assert_eq!(task.created, date(2024, 1, 1));
    assert!(task.completed);

    let legacy = migrate(record(json!({ "minutes": 89.2 })), today());
    assert_eq!(legacy.total_minutes, 90);
}

#[test]
fn document_migration_skips_bad_records_and_keeps_order() {
    let document = json!({
        "Old task": { "minutes": 60 },
        "": { "total_minutes": 10 },
        "Broken": 42,
        "New task": {
            "total_minutes": 30,
            "daily_minutes": 30,
            "completed_minutes": 0,
            "deadline": "2024-01-12",
            "type": "Daily",
            "completed": false,
            "created": "2024-01-09"
        }
    });
    let serde_json::Value::Object(map) = document else {
        panic!("expected object");
    };

    let tasks = migrate_document(map, today());
    let titles: Vec<&str> = tasks.titles().collect();
    assert_eq!(titles, vec!["Old task", "New task"]);
    assert_eq!(tasks.get("Old task").unwrap().total_minutes, 60);
}

#[test]
fn store_load_migrates_legacy_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::in_dir(dir.path());
    let legacy = json!({
        "Read book": { "minutes": 100, "deadline": "2024-03-15", "type": "Monthly" },
        "Stretch": { "minutes": 20, "deadline": "2024-01-31" }
    });
    repo.write_document(DocumentKind::Tasks, &legacy.to_string())
        .unwrap();

    let store = TaskStore::open_with_clock(&repo, FixedClock(today()));
    let read_book = store.get("Read book").unwrap();
    assert_eq!(read_book.total_minutes, 100);
    assert_eq!(read_book.daily_minutes, 34);
    assert_eq!(store.get("Stretch").unwrap().cadence, Cadence::Daily);

    store.save().unwrap();
    let body = repo.read_document(DocumentKind::Tasks).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(saved["Read book"].get("minutes").is_none());
    assert_eq!(saved["Read book"]["total_minutes"], 100);
}
