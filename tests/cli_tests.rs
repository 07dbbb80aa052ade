mod common;
use common::{
    bs, init_cache_with_data, local_at, note, sample_entries, setup_test_cache, temp_out, with_id,
    write_fixture,
};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_cache() {
    let cache = setup_test_cache("cli_init");

    bs().args(["--cache", &cache, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    assert!(fs::metadata(&cache).is_ok());
}

#[test]
fn test_import_then_list_day() {
    let cache = init_cache_with_data("cli_list");

    bs().args(["--cache", &cache, "list", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("supplement Vitamin D"))
        .stdout(predicate::str::contains("diaper both"))
        .stdout(predicate::str::contains("first smile").not());
}

#[test]
fn test_list_type_filter() {
    let cache = init_cache_with_data("cli_list_filter");

    bs().args([
        "--cache",
        &cache,
        "list",
        "--date",
        "2025-09-01",
        "--type",
        "diaper",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("diaper both"))
    .stdout(predicate::str::contains("Vitamin D").not());
}

#[test]
fn test_list_unknown_type_fails() {
    let cache = init_cache_with_data("cli_list_badtype");

    bs().args(["--cache", &cache, "list", "--type", "nap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry type"));
}

#[test]
fn test_list_custom_range_expanded() {
    let cache = init_cache_with_data("cli_list_custom");

    bs().args([
        "--cache",
        &cache,
        "list",
        "--from",
        "2025-09-01",
        "--to",
        "2025-09-02",
        "--expand",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("2025-09-01 ~ 2025-09-02"))
    .stdout(predicate::str::contains("first smile"))
    .stdout(predicate::str::contains("Vitamin D"));
}

#[test]
fn test_stats_json_totals() {
    let cache = init_cache_with_data("cli_stats");

    bs().args(["--cache", &cache, "stats", "--date", "2025-09-01", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"breastFeedings\": 1"))
        .stdout(predicate::str::contains("\"bottleFeedings\": 1"))
        .stdout(predicate::str::contains("\"bottleMl\": 120.0"));
}

#[test]
fn test_stats_table() {
    let cache = init_cache_with_data("cli_stats_table");

    bs().args(["--cache", &cache, "stats", "--date", "2025-09-01", "--unit", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bottle        : 120 ml in 1 feedings"))
        .stdout(predicate::str::contains("09-01"));
}

#[test]
fn test_status_shows_latest() {
    let cache = init_cache_with_data("cli_status");

    bs().args(["--cache", &cache, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feeding formula 120 ml"))
        .stdout(predicate::str::contains("ago"));
}

#[test]
fn test_report_needs_profile() {
    let cache = init_cache_with_data("cli_report");

    bs().args(["--cache", &cache, "report", "--date", "2025-09-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a profile"));
}

#[test]
fn test_add_rolls_back_when_server_unreachable() {
    let cache = init_cache_with_data("cli_add_offline");

    bs().args([
        "--cache",
        &cache,
        "--api",
        "http://127.0.0.1:9/api",
        "add",
        "--at",
        "2025-09-01 18:00",
        "note",
        "never stored",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Network error"));

    bs().args(["--cache", &cache, "list", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("never stored").not());
}

#[test]
fn test_add_rejects_invalid_entry_without_network() {
    let cache = init_cache_with_data("cli_add_invalid");

    bs().args([
        "--cache",
        &cache,
        "--api",
        "http://127.0.0.1:9/api",
        "add",
        "feeding",
        "bottle",
        "--amount=-5",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_del_unknown_entry_fails() {
    let cache = init_cache_with_data("cli_del_unknown");

    bs().args(["--cache", &cache, "del", "nope", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_export_json_and_csv() {
    let cache = init_cache_with_data("cli_export");

    let json_out = temp_out("cli_export", "json");
    bs().args([
        "--cache", &cache, "export", "--file", &json_out, "--range", "2025-09-01", "--force",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("4 entries"));
    let written = fs::read_to_string(&json_out).expect("json written");
    assert!(written.contains("\"version\": \"1.0\""));
    assert!(written.contains("\"logs\""));
    assert!(written.contains("Vitamin D"));
    assert!(!written.contains("first smile"));

    let csv_out = temp_out("cli_export", "csv");
    bs().args([
        "--cache", &cache, "export", "--file", &csv_out, "--format", "csv", "--force",
    ])
    .assert()
    .success();
    let written = fs::read_to_string(&csv_out).expect("csv written");
    assert!(written.starts_with("id,type,timestamp,local_time,detail"));
    assert!(written.contains("SUPPLEMENT"));
}

#[test]
fn test_export_requires_absolute_path() {
    let cache = init_cache_with_data("cli_export_rel");

    bs().args(["--cache", &cache, "export", "--file", "out.json", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let cache = init_cache_with_data("cli_export_empty");
    let out = temp_out("cli_export_empty", "json");

    bs().args(["--cache", &cache, "export", "--file", &out, "--range", "2024", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_backup_compressed() {
    let cache = init_cache_with_data("cli_backup");
    let dest = temp_out("cli_backup", "sqlite");
    let zip = dest.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    bs().args(["--cache", &cache, "backup", "--file", &dest, "--compress", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));

    assert!(fs::metadata(&zip).is_ok());
}

#[test]
fn test_log_records_operations() {
    let cache = init_cache_with_data("cli_log");

    bs().args(["--cache", &cache, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("5 entries imported"));
}

#[test]
fn test_import_backup_restores_profile() {
    let cache = setup_test_cache("cli_import_backup");
    bs().args(["--cache", &cache, "--test", "init"]).assert().success();

    let backup = temp_out("cli_import_backup", "json");
    let body = serde_json::json!({
        "version": "1.0",
        "exportDate": "2025-09-03T10:00:00.000Z",
        "profile": {"name": "Mia", "birthDate": "2025-06-01", "gender": "girl"},
        "logs": sample_entries(),
    });
    fs::write(&backup, body.to_string()).expect("write backup");

    bs().args(["--cache", &cache, "import", "--file", &backup])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile replaced: Mia"))
        .stdout(predicate::str::contains("5 entries imported"));

    bs().args(["--cache", &cache, "report", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mia is"));
}

#[test]
fn test_import_of_older_file_asks_first() {
    let cache = init_cache_with_data("cli_import_older");
    let older = write_fixture(
        "cli_import_older_file",
        &[with_id(note(local_at("2025-08-01", "09:00"), "old note"), "9")],
    );

    bs().args(["--cache", &cache, "import", "--file", &older])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("older than the local data"))
        .stdout(predicate::str::contains("Import cancelled"));

    bs().args(["--cache", &cache, "list", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vitamin D"));

    bs().args(["--cache", &cache, "import", "--file", &older, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries imported"));
}
