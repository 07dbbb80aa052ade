//! Age of the child at the instant a report is "as of".

use crate::core::window::{CustomRange, TimeWindow, ViewUnit};
use crate::utils::date::{MS_PER_DAY, local_midnight};
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Age {
    pub days: i64,
    pub months: i64,
    pub remainder_days: i64,
}

impl Age {
    pub fn describe(&self) -> String {
        format!(
            "{} months {} days (day {})",
            self.months, self.remainder_days, self.days
        )
    }
}

/// How whole days are folded into months.
pub trait AgeModel {
    fn age(&self, birth_millis: i64, reference_millis: i64) -> Age;
}

/// Every month counts as 30 days. Good enough for report prompts and kept
/// behind `AgeModel` so a calendar-accurate model can replace it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirtyDayMonths;

impl AgeModel for ThirtyDayMonths {
    fn age(&self, birth_millis: i64, reference_millis: i64) -> Age {
        let diff = reference_millis.saturating_sub(birth_millis);
        let days = ceil_div(diff, MS_PER_DAY).max(0);

        Age {
            days,
            months: days / 30,
            remainder_days: days % 30,
        }
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b > 0 { q + 1 } else { q }
}

/// Age at `reference_millis` for a child born on `birth` (local midnight).
pub fn age_at<Tz: TimeZone>(tz: &Tz, birth: NaiveDate, reference_millis: i64) -> Age {
    ThirtyDayMonths.age(local_midnight(tz, birth), reference_millis)
}

/// The instant a window's report is "as of".
///
/// - day: the anchor's local midnight
/// - week / month: one second before the window ends
/// - custom: midnight of the chosen end date, or `now` when open-ended
pub fn report_reference<Tz: TimeZone>(
    tz: &Tz,
    unit: ViewUnit,
    anchor: NaiveDate,
    window: &TimeWindow,
    custom: &CustomRange,
    now_millis: i64,
) -> i64 {
    match unit {
        ViewUnit::Day => local_midnight(tz, anchor),
        ViewUnit::Week | ViewUnit::Month => {
            if window.has_end() {
                window.end - 1000
            } else {
                now_millis
            }
        }
        ViewUnit::Custom => match custom.end_date() {
            Some(d) => local_midnight(tz, d),
            None => now_millis,
        },
    }
}
