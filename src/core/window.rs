//! Window calculator: maps an anchor date and a view unit to the half-open
//! interval `[start, end)` of epoch millis currently being viewed.

use crate::utils::date::{self, local_date, local_midnight, local_millis};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewUnit {
    Day,
    Week,
    Month,
    Custom,
}

impl ViewUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewUnit::Day => "day",
            ViewUnit::Week => "week",
            ViewUnit::Month => "month",
            ViewUnit::Custom => "custom",
        }
    }
}

/// Half-open interval of epoch millis. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub const UNBOUNDED_START: i64 = 0;
    pub const UNBOUNDED_END: i64 = i64::MAX;

    /// An inverted pair collapses to the empty window at `start`.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(Self::UNBOUNDED_START, Self::UNBOUNDED_END)
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start <= ts && ts < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_start(&self) -> bool {
        self.start != Self::UNBOUNDED_START
    }

    pub fn has_end(&self) -> bool {
        self.end != Self::UNBOUNDED_END
    }

    pub fn is_bounded(&self) -> bool {
        self.has_start() && self.has_end()
    }
}

/// User-supplied inclusive bounds of a custom window, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CustomRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.as_deref().and_then(date::parse_loose_date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.as_deref().and_then(date::parse_loose_date)
    }
}

/// Window computation bound to a time zone and a first weekday.
#[derive(Debug, Clone)]
pub struct WindowCalculator<Tz: TimeZone> {
    tz: Tz,
    week_start: Weekday,
}

impl<Tz: TimeZone> WindowCalculator<Tz> {
    pub fn new(tz: Tz, week_start: Weekday) -> Self {
        Self { tz, week_start }
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn window(&self, anchor: NaiveDate, unit: ViewUnit, custom: &CustomRange) -> TimeWindow {
        match unit {
            ViewUnit::Day => {
                let start = local_midnight(&self.tz, anchor);
                TimeWindow::new(start, self.midnight_after(anchor, 1))
            }
            ViewUnit::Week => {
                let first = self.first_day_of_week(anchor);
                let start = local_midnight(&self.tz, first);
                TimeWindow::new(start, self.midnight_after(first, 7))
            }
            ViewUnit::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let start = local_midnight(&self.tz, first);
                let end = match first.checked_add_months(Months::new(1)) {
                    Some(next) => local_midnight(&self.tz, next),
                    None => TimeWindow::UNBOUNDED_END,
                };
                TimeWindow::new(start, end)
            }
            ViewUnit::Custom => {
                let start = match custom.start_date() {
                    Some(d) => local_midnight(&self.tz, d),
                    None => TimeWindow::UNBOUNDED_START,
                };
                let end = match custom.end_date() {
                    Some(d) => {
                        let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
                            .unwrap_or(NaiveTime::MIN);
                        local_millis(&self.tz, d.and_time(last))
                    }
                    None => TimeWindow::UNBOUNDED_END,
                };
                TimeWindow::new(start, end)
            }
        }
    }

    /// Most recent configured first weekday on or before `anchor`.
    pub fn first_day_of_week(&self, anchor: NaiveDate) -> NaiveDate {
        let back = (7 + anchor.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;
        anchor
            .checked_sub_days(Days::new(back as u64))
            .unwrap_or(anchor)
    }

    /// Human label of the active window.
    pub fn range_label(
        &self,
        unit: ViewUnit,
        anchor: NaiveDate,
        window: &TimeWindow,
        custom: &CustomRange,
    ) -> String {
        match unit {
            ViewUnit::Day => anchor.format("%Y-%m-%d").to_string(),
            ViewUnit::Week => {
                let first = self.first_day_of_week(anchor);
                let last = first.checked_add_days(Days::new(6)).unwrap_or(first);
                format!("{} ~ {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
            }
            ViewUnit::Month => anchor.format("%Y-%m").to_string(),
            ViewUnit::Custom => {
                let from = if window.has_start() {
                    custom
                        .start_date()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "…".into())
                } else {
                    "…".into()
                };
                let to = if window.has_end() {
                    local_date(&self.tz, window.end)
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "…".into())
                } else {
                    "…".into()
                };
                format!("{from} ~ {to}")
            }
        }
    }

    fn midnight_after(&self, date: NaiveDate, days: u64) -> i64 {
        match date.checked_add_days(Days::new(days)) {
            Some(next) => local_midnight(&self.tz, next),
            None => TimeWindow::UNBOUNDED_END,
        }
    }
}

/// Shift the anchor by `steps` units. Month shifts clamp to the last day of
/// the target month. A custom window has no unit to step by.
pub fn navigate(anchor: NaiveDate, unit: ViewUnit, steps: i32) -> NaiveDate {
    let shifted = match unit {
        ViewUnit::Day => shift_days(anchor, steps as i64),
        ViewUnit::Week => shift_days(anchor, steps as i64 * 7),
        ViewUnit::Month => {
            let months = Months::new(steps.unsigned_abs());
            if steps >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            }
        }
        ViewUnit::Custom => Some(anchor),
    };

    shifted.unwrap_or(anchor)
}

fn shift_days(anchor: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        anchor.checked_add_days(Days::new(days as u64))
    } else {
        anchor.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// "Today" resets both the anchor and the unit.
pub fn jump_to_today(today: NaiveDate) -> (NaiveDate, ViewUnit) {
    (today, ViewUnit::Day)
}

/// Parse a stored or typed anchor; anything unreadable means "today".
pub fn resolve_anchor(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    match raw {
        None => today,
        Some(s) => match date::parse_loose_date(s) {
            Some(d) => d,
            None => {
                warn!(anchor = s, "unreadable anchor date, using today");
                today
            }
        },
    }
}
