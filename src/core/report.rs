//! Input handed to the AI report writer, and the saved result.

use crate::core::age::{Age, age_at, report_reference};
use crate::core::calculator::buckets::in_window;
use crate::core::window::{CustomRange, ViewUnit, WindowCalculator};
use crate::errors::{AppError, AppResult};
use crate::models::entry::{Advice, Entry, EntryDetails};
use crate::models::profile::Profile;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub profile: Profile,
    pub report_type: ViewUnit,
    pub range_label: String,
    pub age: Age,
    /// Entries of the window, newest first.
    pub entries: Vec<Entry>,
}

impl ReportContext {
    pub fn build<Tz: TimeZone>(
        calc: &WindowCalculator<Tz>,
        profile: &Profile,
        entries: &[Entry],
        anchor: NaiveDate,
        unit: ViewUnit,
        custom: &CustomRange,
        now_millis: i64,
    ) -> Self {
        let tz = calc.tz();
        let window = calc.window(anchor, unit, custom);
        let reference = report_reference(tz, unit, anchor, &window, custom, now_millis);

        Self {
            profile: profile.clone(),
            report_type: unit,
            range_label: calc.range_label(unit, anchor, &window, custom),
            age: age_at(tz, profile.birth_date, reference),
            entries: in_window(entries, &window).into_iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Wrap generated advice as an ADVICE entry ready for `SyncClient::create`.
    pub fn advice_entry(&self, title: &str, content: &str, timestamp: i64) -> AppResult<Entry> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("advice content must not be empty".into()));
        }

        let entry = Entry::new(
            timestamp,
            EntryDetails::Advice(Advice {
                title: title.to_string(),
                content: content.to_string(),
                report_type: Some(self.report_type),
            }),
        );
        entry.validate()?;
        Ok(entry)
    }
}
