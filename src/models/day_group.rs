use super::entry::Entry;
use chrono::NaiveDate;
use serde::Serialize;

/// Entries of one calendar day, most recent first.
///
/// Identity is the calendar date itself; `label()` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

impl DayGroup {
    /// Locale-independent group key (`YYYY-MM-DD`).
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d %A").to_string()
    }
}
