#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use babysteps::models::entry::{Diaper, Entry, EntryDetails, Feeding, NoteText, Supplement};
use babysteps::models::entry_type::{DiaperStatus, FeedingMethod};
use babysteps::utils::date::local_millis;
use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch dir so no real config is read.
pub fn bs() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("babysteps_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("babysteps");
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique cache path inside the system temp dir and remove any existing file
pub fn setup_test_cache(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_babysteps.sqlite", name));
    let cache_path = path.to_string_lossy().to_string();
    fs::remove_file(&cache_path).ok();
    cache_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn naive(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
        .expect("valid test datetime")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// UTC+8, the zone most fixtures are written in.
pub fn cst() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("valid offset")
}

pub fn at<Tz: TimeZone>(tz: &Tz, date: &str, time: &str) -> i64 {
    local_millis(tz, naive(date, time))
}

pub fn local_at(date: &str, time: &str) -> i64 {
    at(&Local, date, time)
}

pub fn with_id(mut e: Entry, id: &str) -> Entry {
    e.id = id.to_string();
    e
}

pub fn breast(ts: i64, minutes: f64) -> Entry {
    let mut f = Feeding::new(FeedingMethod::Breast);
    f.duration = Some(minutes);
    Entry::new(ts, EntryDetails::Feeding(f))
}

pub fn bottle(ts: i64, ml: f64) -> Entry {
    let mut f = Feeding::new(FeedingMethod::Bottle);
    f.amount = Some(ml);
    Entry::new(ts, EntryDetails::Feeding(f))
}

pub fn formula(ts: i64, ml: f64) -> Entry {
    let mut f = Feeding::new(FeedingMethod::Formula);
    f.amount = Some(ml);
    Entry::new(ts, EntryDetails::Feeding(f))
}

pub fn diaper(ts: i64, status: DiaperStatus) -> Entry {
    Entry::new(ts, EntryDetails::Diaper(Diaper { status }))
}

pub fn supplement(ts: i64, name: &str) -> Entry {
    Entry::new(
        ts,
        EntryDetails::Supplement(Supplement {
            name: name.to_string(),
            dosage: None,
        }),
    )
}

pub fn note(ts: i64, content: &str) -> Entry {
    Entry::new(
        ts,
        EntryDetails::Note(NoteText {
            content: content.to_string(),
        }),
    )
}

/// A small local-time dataset spread over 2025-09-01 and 2025-09-02.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        with_id(breast(local_at("2025-09-01", "08:00"), 15.0), "1"),
        with_id(formula(local_at("2025-09-01", "11:30"), 120.0), "2"),
        with_id(diaper(local_at("2025-09-01", "12:00"), DiaperStatus::Both), "3"),
        with_id(supplement(local_at("2025-09-01", "09:00"), "Vitamin D"), "4"),
        with_id(note(local_at("2025-09-02", "10:00"), "first smile"), "5"),
    ]
}

/// Write entries as a JSON file the `import` command accepts.
pub fn write_fixture(name: &str, entries: &[Entry]) -> String {
    let path = temp_out(name, "json");
    fs::write(&path, serde_json::to_string_pretty(entries).expect("serialize fixture"))
        .expect("write fixture");
    path
}

/// `init` a fresh cache and import `sample_entries()` into it.
pub fn init_cache_with_data(name: &str) -> String {
    let cache = setup_test_cache(name);

    bs().args(["--cache", &cache, "--test", "init"])
        .assert()
        .success();

    let fixture = write_fixture(&format!("{name}_fixture"), &sample_entries());
    bs().args(["--cache", &cache, "import", "--file", &fixture])
        .assert()
        .success();

    cache
}
