use crate::core::calculator::buckets::{self, Bucket};
use crate::core::calculator::groups::{TypeFilter, group_by_day};
use crate::core::calculator::summary::{WindowSummary, summarize};
use crate::core::window::{CustomRange, TimeWindow, ViewUnit, WindowCalculator};
use crate::models::day_group::DayGroup;
use crate::models::entry::Entry;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

/// Everything the list and stats views need for one window.
#[derive(Debug, Clone, Serialize)]
pub struct WindowView {
    pub unit: ViewUnit,
    pub anchor: NaiveDate,
    pub window: TimeWindow,
    pub label: String,
    pub buckets: Vec<Bucket>,
    pub summary: WindowSummary,
    /// Type-filtered entries grouped by day.
    pub groups: Vec<DayGroup>,
}

pub struct Core;

impl Core {
    pub fn build_window_view<Tz: TimeZone>(
        calc: &WindowCalculator<Tz>,
        entries: &[Entry],
        anchor: NaiveDate,
        unit: ViewUnit,
        custom: &CustomRange,
        filter: &TypeFilter,
    ) -> WindowView {
        let tz = calc.tz();
        let window = calc.window(anchor, unit, custom);
        let in_window = buckets::in_window(entries, &window);

        WindowView {
            unit,
            anchor,
            window,
            label: calc.range_label(unit, anchor, &window, custom),
            buckets: buckets::build_buckets(tz, entries, &window, unit),
            summary: summarize(&in_window),
            groups: group_by_day(tz, filter.apply(in_window.iter().copied())),
        }
    }
}
