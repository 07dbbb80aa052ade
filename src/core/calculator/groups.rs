use crate::models::day_group::DayGroup;
use crate::models::entry::Entry;
use crate::models::entry_type::EntryType;
use chrono::{NaiveDate, TimeZone};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Group entries by their local calendar day: most recent day first, and
/// most recent entry first within a day.
pub fn group_by_day<'a, Tz: TimeZone>(
    tz: &Tz,
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Entry>> = BTreeMap::new();

    for e in entries {
        if let Some(local) = e.local_time(tz) {
            days.entry(local.date_naive()).or_default().push(e.clone());
        }
    }

    days.into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| {
                b.timestamp
                    .cmp(&a.timestamp)
                    .then_with(|| a.id.cmp(&b.id))
            });
            DayGroup { date, entries }
        })
        .collect()
}

/// Entry types shown in the list view. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter {
    selected: BTreeSet<EntryType>,
}

impl Default for TypeFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl TypeFilter {
    pub fn all() -> Self {
        Self {
            selected: EntryType::ALL.into_iter().collect(),
        }
    }

    /// Empty input means "everything".
    pub fn only(types: &[EntryType]) -> Self {
        if types.is_empty() {
            return Self::all();
        }
        Self {
            selected: types.iter().copied().collect(),
        }
    }

    pub fn allows(&self, t: EntryType) -> bool {
        self.selected.contains(&t)
    }

    /// The last selected type cannot be switched off.
    pub fn toggle(&mut self, t: EntryType) {
        if self.selected.contains(&t) {
            if self.selected.len() > 1 {
                self.selected.remove(&t);
            }
        } else {
            self.selected.insert(t);
        }
    }

    pub fn apply<'a>(&self, entries: impl IntoIterator<Item = &'a Entry>) -> Vec<&'a Entry> {
        entries
            .into_iter()
            .filter(|e| self.allows(e.entry_type()))
            .collect()
    }
}

/// Which day groups are expanded in a list view.
///
/// Kept apart from grouping so that computing groups never changes it; the
/// caller decides when to seed the default.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: BTreeSet<NaiveDate>,
    seeded: bool,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand the most recent day the first time groups become available.
    /// Returns true if the state changed.
    pub fn seed_default(&mut self, groups: &[DayGroup]) -> bool {
        if self.seeded || !self.expanded.is_empty() {
            return false;
        }
        match groups.first() {
            Some(first) => {
                self.expanded.insert(first.date);
                self.seeded = true;
                true
            }
            None => false,
        }
    }

    pub fn expand(&mut self, date: NaiveDate) {
        self.expanded.insert(date);
    }

    pub fn toggle(&mut self, date: NaiveDate) {
        if !self.expanded.remove(&date) {
            self.expanded.insert(date);
        }
    }

    pub fn is_expanded(&self, date: NaiveDate) -> bool {
        self.expanded.contains(&date)
    }

    pub fn expanded(&self) -> Vec<NaiveDate> {
        let mut v: Vec<NaiveDate> = self.expanded.iter().copied().collect();
        v.sort_by_key(|d| Reverse(*d));
        v
    }
}
