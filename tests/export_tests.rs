mod common;
use babysteps::cli::commands::add::build_entry;
use babysteps::cli::parser::{EntryArgs, EntryKind};
use babysteps::errors::AppError;
use babysteps::export::{
    BACKUP_VERSION, Backup, EntryExport, ExportFormat, ExportLogic, ImportLogic, parse_range,
};
use babysteps::models::entry::EntryDetails;
use babysteps::models::entry_type::{EntryType, FeedingMethod, FeedingSide};
use babysteps::models::profile::{Gender, Profile};
use chrono::Utc;
use common::{at, breast, bottle, date, note, temp_out, with_id};
use std::fs;

#[test]
fn test_parse_range_shapes() {
    assert_eq!(
        parse_range("2025").expect("year"),
        (date("2025-01-01"), date("2025-12-31"))
    );
    assert_eq!(
        parse_range("2024-02").expect("month"),
        (date("2024-02-01"), date("2024-02-29"))
    );
    assert_eq!(
        parse_range("2025-09-01").expect("day"),
        (date("2025-09-01"), date("2025-09-01"))
    );
    assert_eq!(
        parse_range("2025-08:2025-09").expect("months"),
        (date("2025-08-01"), date("2025-09-30"))
    );
}

#[test]
fn test_parse_range_rejects_bad_input() {
    assert!(matches!(parse_range("2025-9"), Err(AppError::InvalidDate(_))));
    assert!(parse_range("2025-09:2025-09-10").is_err());
    assert!(parse_range("2025-10:2025-09").is_err());
}

#[test]
fn test_import_assigns_ids_and_accepts_localized_values() {
    let path = temp_out("import_localized", "json");
    fs::write(
        &path,
        r#"[
          {"type":"FEEDING","timestamp":1000,"method":"奶粉","amount":90},
          {"id":"7","type":"DIAPER","timestamp":2000,"status":"都有"}
        ]"#,
    )
    .expect("write");

    let entries = ImportLogic::read(&path).expect("read").logs;

    assert_eq!(entries[0].id, "import-1000-1");
    assert_eq!(
        entries[0].feeding().map(|f| f.method),
        Some(FeedingMethod::Formula)
    );
    assert_eq!(entries[1].id, "7");
    assert_eq!(entries[1].entry_type(), EntryType::Diaper);
}

#[test]
fn test_import_rejects_invalid_entry() {
    let path = temp_out("import_invalid", "json");
    fs::write(
        &path,
        r#"[{"id":"1","type":"NOTE","timestamp":1000,"content":"ok"},
            {"id":"2","type":"NOTE","timestamp":2000,"content":""}]"#,
    )
    .expect("write");

    let err = ImportLogic::read(&path).unwrap_err();
    assert!(err.to_string().contains("entry #2"));
}

#[test]
fn test_import_reads_full_backup() {
    let path = temp_out("import_backup", "json");
    fs::write(
        &path,
        r#"{
          "version": "1.0",
          "exportDate": "2025-09-03T10:00:00.000Z",
          "profile": {"name": "Mia", "birthDate": "2025-06-01T00:00:00.000Z", "gender": "girl"},
          "logs": [
            {"id": "1", "type": "NOTE", "timestamp": 2000, "content": "hi"},
            {"type": "FEEDING", "timestamp": 1000, "method": "bottle", "amount": 60}
          ]
        }"#,
    )
    .expect("write");

    let backup = ImportLogic::read(&path).expect("read");

    assert_eq!(backup.version, "1.0");
    let profile = backup.profile.expect("profile");
    assert_eq!(profile.name, "Mia");
    assert_eq!(profile.birth_date, date("2025-06-01"));
    assert_eq!(backup.logs.len(), 2);
    assert_eq!(backup.logs[1].id, "import-1000-2");
}

#[test]
fn test_import_rejects_invalid_profile() {
    let path = temp_out("import_bad_profile", "json");
    fs::write(
        &path,
        r#"{"version":"1.0","profile":{"name":" ","birthDate":"2025-06-01","gender":"boy"},"logs":[]}"#,
    )
    .expect("write");

    let err = ImportLogic::read(&path).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("profile"));
}

#[test]
fn test_import_older_than_local_data() {
    let backup = Backup::new(None, vec![with_id(note(5_000, "a"), "a")]);
    let current = vec![with_id(note(9_000, "b"), "b")];

    assert!(ImportLogic::is_older(&backup, &current));
    assert!(!ImportLogic::is_older(&backup, &[]));
    assert!(!ImportLogic::is_older(&backup, &[with_id(note(5_000, "c"), "c")]));

    let empty = Backup {
        version: BACKUP_VERSION.into(),
        export_date: Some("1970-01-01T00:00:10Z".into()),
        profile: None,
        logs: vec![],
    };
    assert_eq!(empty.newest(), 10_000);
    assert!(!ImportLogic::is_older(&empty, &current));
    assert!(ImportLogic::is_older(&empty, &[with_id(note(20_000, "d"), "d")]));
}

#[test]
fn test_json_export_carries_profile() {
    let path = temp_out("export_backup", "json");
    let profile = Profile::new("Leo", date("2025-05-20"), Gender::Boy);
    let entries = vec![
        with_id(bottle(at(&Utc, "2025-09-01", "08:00"), 90.0), "2"),
        with_id(note(at(&Utc, "2025-08-31", "20:00"), "bath"), "1"),
    ];

    let written = ExportLogic::export(
        &Utc,
        &entries,
        Some(&profile),
        ExportFormat::Json,
        &path,
        None,
        true,
    )
    .expect("export");
    assert_eq!(written, 2);

    let back = ImportLogic::read(&path).expect("read back");
    assert_eq!(back.version, BACKUP_VERSION);
    assert!(back.export_date.is_some());
    assert_eq!(back.profile, Some(profile));
    let ids: Vec<&str> = back.logs.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_export_row_flattens_feeding() {
    let e = with_id(breast(at(&Utc, "2025-09-01", "08:00"), 15.0), "1");
    let row = EntryExport::from_entry(&Utc, &e);

    assert_eq!(row.kind, "FEEDING");
    assert_eq!(row.detail, "breast");
    assert_eq!(row.duration_min, Some(15.0));
    assert_eq!(row.amount_ml, None);
}

#[test]
fn test_build_entry_from_arguments() {
    let kind = EntryKind::Feeding {
        method: "breast".into(),
        amount: None,
        duration: None,
        left: Some(6.0),
        right: Some(9.0),
        side: Some("both".into()),
    };
    let common = EntryArgs {
        at: Some("2025-09-01 07:30".into()),
        note: Some("sleepy".into()),
    };

    let e = build_entry(&kind, &common, 0, None, date("2025-09-01")).expect("entry");

    assert!(e.id.is_empty());
    assert!(e.timestamp > 0);
    assert_eq!(e.note.as_deref(), Some("sleepy"));
    match e.details {
        EntryDetails::Feeding(f) => {
            assert_eq!(f.total_minutes(), 15.0);
            assert_eq!(f.side, Some(FeedingSide::Both));
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn test_build_entry_rejects_unknown_codes() {
    let kind = EntryKind::Diaper {
        status: "soaked".into(),
    };
    let err = build_entry(&kind, &EntryArgs::default(), 1_000, None, date("2025-09-01"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidEntryType(_)));

    let kind = EntryKind::Note {
        content: "x".into(),
    };
    let common = EntryArgs {
        at: Some("yesterday-ish".into()),
        note: None,
    };
    let err = build_entry(&kind, &common, 1_000, None, date("2025-09-01")).unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
}
