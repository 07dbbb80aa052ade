use super::buckets::{Metrics, totals};
use crate::models::entry::Entry;
use crate::models::entry_type::{EntryType, FeedingMethod};
use serde::Serialize;

/// Window-level totals for the stats view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub totals: Metrics,
    pub breast_feedings: usize,
    pub bottle_feedings: usize,
    /// Feedings in chronological order.
    pub feedings: Vec<Entry>,
}

pub fn summarize(entries: &[&Entry]) -> WindowSummary {
    let mut feedings: Vec<Entry> = entries
        .iter()
        .filter(|e| e.entry_type() == EntryType::Feeding)
        .map(|e| (*e).clone())
        .collect();
    feedings.sort_by_key(|e| e.timestamp);

    let breast_feedings = feedings
        .iter()
        .filter(|e| e.feeding().is_some_and(|f| f.method == FeedingMethod::Breast))
        .count();
    let bottle_feedings = feedings
        .iter()
        .filter(|e| e.feeding().is_some_and(|f| f.method.is_bottle()))
        .count();

    WindowSummary {
        totals: totals(entries.iter().copied()),
        breast_feedings,
        bottle_feedings,
        feedings,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Latest {
    pub entry: Entry,
    pub elapsed: String,
}

/// Most recent entry of each tracked category, across the whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Status {
    pub breast: Option<Latest>,
    pub bottle: Option<Latest>,
    pub formula: Option<Latest>,
    pub diaper: Option<Latest>,
    pub supplement: Option<Latest>,
}

pub fn latest_status(entries: &[Entry], now_millis: i64) -> Status {
    let latest = |pred: &dyn Fn(&Entry) -> bool| -> Option<Latest> {
        entries
            .iter()
            .filter(|e| pred(e))
            .max_by_key(|e| e.timestamp)
            .map(|e| Latest {
                entry: e.clone(),
                elapsed: format_elapsed(now_millis, e.timestamp),
            })
    };
    let feeding_by = |m: FeedingMethod| move |e: &Entry| e.feeding().is_some_and(|f| f.method == m);

    Status {
        breast: latest(&feeding_by(FeedingMethod::Breast)),
        bottle: latest(&feeding_by(FeedingMethod::Bottle)),
        formula: latest(&feeding_by(FeedingMethod::Formula)),
        diaper: latest(&|e: &Entry| e.entry_type() == EntryType::Diaper),
        supplement: latest(&|e: &Entry| e.entry_type() == EntryType::Supplement),
    }
}

/// "just now", "42m ago", "3h5m ago", "2d ago".
pub fn format_elapsed(now_millis: i64, then_millis: i64) -> String {
    let mins = (now_millis - then_millis).div_euclid(60_000);
    if mins <= 0 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }

    let hours = mins / 60;
    let rest = mins % 60;
    if hours < 24 {
        if rest > 0 {
            format!("{hours}h{rest}m ago")
        } else {
            format!("{hours}h ago")
        }
    } else {
        format!("{}d ago", hours / 24)
    }
}
