use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accept `YYYY-MM-DD` or any longer ISO-8601 string starting with a date.
pub fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(d) = parse_date(s) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(0..10).and_then(parse_date)
}

/// Epoch millis of the given local wall-clock time.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// fall in a DST gap move forward to the first valid hour.
pub fn local_millis<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> i64 {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(early, _) => early.timestamp_millis(),
        LocalResult::None => {
            let mut shifted = naive;
            for _ in 0..4 {
                shifted += chrono::Duration::hours(1);
                if let Some(dt) = tz.from_local_datetime(&shifted).earliest() {
                    return dt.timestamp_millis();
                }
            }
            tz.from_utc_datetime(&naive).timestamp_millis()
        }
    }
}

/// Epoch millis of the local midnight that starts `date`.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    local_millis(tz, date.and_time(NaiveTime::MIN))
}

/// Calendar date of an instant in the given zone.
pub fn local_date<Tz: TimeZone>(tz: &Tz, millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Every calendar date `d` with `start <= d < end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;

    while d < end {
        out.push(d);
        match d.checked_add_days(Days::new(1)) {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// Parse `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or a bare `HH:MM` (today).
pub fn parse_datetime(s: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(today.and_time(t));
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Format epoch millis as local `YYYY-MM-DD HH:MM`.
pub fn format_millis<Tz: TimeZone>(tz: &Tz, millis: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        None => format!("@{millis}"),
    }
}
