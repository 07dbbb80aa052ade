//! Per-slot aggregation of a window: hourly slots for a day view, calendar
//! days otherwise. Pure: the output depends only on the arguments.

use crate::core::window::{TimeWindow, ViewUnit};
use crate::models::entry::{Entry, EntryDetails};
use crate::models::entry_type::FeedingMethod;
use crate::utils::date::{days_between, local_date};
use chrono::{Days, NaiveDate, TimeZone, Timelike};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    BreastMinutes,
    BottleMl,
    SolidAmount,
    Feedings,
    Wet,
    Dirty,
    Supplements,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::BreastMinutes,
        Metric::BottleMl,
        Metric::SolidAmount,
        Metric::Feedings,
        Metric::Wet,
        Metric::Dirty,
        Metric::Supplements,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::BreastMinutes => "breast min",
            Metric::BottleMl => "bottle ml",
            Metric::SolidAmount => "solid",
            Metric::Feedings => "feeds",
            Metric::Wet => "wet",
            Metric::Dirty => "dirty",
            Metric::Supplements => "suppl",
        }
    }
}

/// Category → numeric sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics(BTreeMap<Metric, f64>);

impl Metrics {
    /// Every metric present and zero.
    pub fn zeroed() -> Self {
        Self(Metric::ALL.iter().map(|m| (*m, 0.0)).collect())
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.0.get(&metric).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, metric: Metric, value: f64) {
        *self.0.entry(metric).or_insert(0.0) += value;
    }

    pub fn merge(&mut self, other: &Metrics) {
        for (m, v) in &other.0 {
            self.add(*m, *v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }
}

/// What a single entry adds to whichever slot it lands in. Absent optional
/// quantities count as zero.
pub fn contribution(entry: &Entry) -> Metrics {
    let mut m = Metrics::default();

    match &entry.details {
        EntryDetails::Feeding(f) => {
            m.add(Metric::Feedings, 1.0);
            match f.method {
                FeedingMethod::Breast => m.add(Metric::BreastMinutes, f.total_minutes()),
                FeedingMethod::Bottle | FeedingMethod::Formula => {
                    m.add(Metric::BottleMl, f.amount.unwrap_or(0.0))
                }
                FeedingMethod::Solid => m.add(Metric::SolidAmount, f.amount.unwrap_or(0.0)),
            }
        }
        EntryDetails::Diaper(d) => {
            if d.status.is_wet() {
                m.add(Metric::Wet, 1.0);
            }
            if d.status.is_dirty() {
                m.add(Metric::Dirty, 1.0);
            }
        }
        EntryDetails::Supplement(_) => m.add(Metric::Supplements, 1.0),
        _ => {}
    }

    m
}

/// Locale-independent slot identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketKey {
    Hour(u32),
    Day(NaiveDate),
}

impl BucketKey {
    pub fn label(&self) -> String {
        match self {
            BucketKey::Hour(h) => format!("{h}:00"),
            BucketKey::Day(d) => d.format("%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub label: String,
    pub metrics: Metrics,
}

impl Bucket {
    fn seeded(key: BucketKey) -> Self {
        Self {
            key,
            label: key.label(),
            metrics: Metrics::zeroed(),
        }
    }
}

/// Entries with `start <= timestamp < end`.
pub fn in_window<'a>(entries: &'a [Entry], window: &TimeWindow) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|e| window.contains(e.timestamp))
        .collect()
}

/// Ordered, pre-seeded buckets for the window with every in-window entry's
/// contribution added to its slot.
pub fn build_buckets<Tz: TimeZone>(
    tz: &Tz,
    entries: &[Entry],
    window: &TimeWindow,
    unit: ViewUnit,
) -> Vec<Bucket> {
    let filtered = in_window(entries, window);

    let keys: Vec<BucketKey> = match unit {
        ViewUnit::Day => (0..24).map(BucketKey::Hour).collect(),
        _ => match day_span(tz, &filtered, window) {
            Some((first, end)) => days_between(first, end)
                .into_iter()
                .map(BucketKey::Day)
                .collect(),
            None => Vec::new(),
        },
    };

    let mut buckets: Vec<Bucket> = keys.iter().map(|k| Bucket::seeded(*k)).collect();
    let index: HashMap<BucketKey, usize> =
        keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();

    for entry in filtered {
        let Some(local) = entry.local_time(tz) else {
            continue;
        };
        let key = match unit {
            ViewUnit::Day => BucketKey::Hour(local.hour()),
            _ => BucketKey::Day(local.date_naive()),
        };

        match index.get(&key) {
            Some(&i) => buckets[i].metrics.merge(&contribution(entry)),
            None => debug!(id = %entry.id, ?key, "entry has no matching bucket"),
        }
    }

    buckets
}

/// First calendar day and the day after the last one. Open window sides are
/// closed by the earliest / latest entry inside the window.
fn day_span<Tz: TimeZone>(
    tz: &Tz,
    filtered: &[&Entry],
    window: &TimeWindow,
) -> Option<(NaiveDate, NaiveDate)> {
    if window.is_empty() {
        return None;
    }

    let first = if window.has_start() {
        local_date(tz, window.start)?
    } else {
        filtered
            .iter()
            .filter_map(|e| local_date(tz, e.timestamp))
            .min()?
    };

    let last = if window.has_end() {
        local_date(tz, window.end - 1)?
    } else {
        filtered
            .iter()
            .filter_map(|e| local_date(tz, e.timestamp))
            .max()?
    };

    Some((first, last.checked_add_days(Days::new(1))?))
}

/// Sum of every metric over the given entries.
pub fn totals<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Metrics {
    let mut m = Metrics::zeroed();
    for e in entries {
        m.merge(&contribution(e));
    }
    m
}
