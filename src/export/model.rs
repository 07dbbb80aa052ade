use crate::models::entry::{Entry, EntryDetails};
use crate::models::profile::Profile;
use crate::utils::date::format_millis;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const BACKUP_VERSION: &str = "1.0";

/// Full data file: the profile and every entry, as `export --format json`
/// writes it and `import` reads it back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub logs: Vec<Entry>,
}

impl Backup {
    pub fn new(profile: Option<Profile>, logs: Vec<Entry>) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            export_date: Some(Utc::now().to_rfc3339()),
            profile,
            logs,
        }
    }

    /// Newest entry timestamp, or the export date for an empty log.
    pub fn newest(&self) -> i64 {
        match self.logs.iter().map(|e| e.timestamp).max() {
            Some(ts) => ts,
            None => self
                .export_date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.timestamp_millis())
                .unwrap_or(0),
        }
    }
}

/// Flat projection of an entry for spreadsheet use.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
    pub local_time: String,
    /// Feeding method, diaper status or growth category.
    pub detail: String,
    pub amount_ml: Option<f64>,
    pub duration_min: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    /// Growth event, vaccine, supplement or advice title.
    pub name: String,
    pub text: String,
    pub note: String,
}

impl EntryExport {
    pub fn from_entry<Tz: TimeZone>(tz: &Tz, e: &Entry) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut row = Self {
            id: e.id.clone(),
            kind: e.entry_type().et_as_str().to_string(),
            timestamp: e.timestamp,
            local_time: format_millis(tz, e.timestamp),
            detail: String::new(),
            amount_ml: None,
            duration_min: None,
            weight_kg: None,
            height_cm: None,
            name: String::new(),
            text: String::new(),
            note: e.note.clone().unwrap_or_default(),
        };

        match &e.details {
            EntryDetails::Feeding(f) => {
                row.detail = f.method.as_str().to_string();
                row.amount_ml = f.amount;
                if f.duration.is_some() || f.left_duration.is_some() || f.right_duration.is_some() {
                    row.duration_min = Some(f.total_minutes());
                }
            }
            EntryDetails::Diaper(d) => row.detail = d.status.as_str().to_string(),
            EntryDetails::Growth(g) => {
                row.detail = g.category.as_str().to_string();
                row.name = g.event_name.clone();
                row.weight_kg = g.weight;
                row.height_cm = g.height;
            }
            EntryDetails::Vaccine(v) => {
                row.name = v.vaccine_name.clone();
                row.text = v.next_dose_date.clone().unwrap_or_default();
            }
            EntryDetails::Supplement(s) => {
                row.name = s.name.clone();
                row.text = s.dosage.clone().unwrap_or_default();
            }
            EntryDetails::Note(n) => row.text = n.content.clone(),
            EntryDetails::Advice(a) => {
                row.name = a.title.clone();
                row.text = a.content.clone();
            }
        }
        row
    }
}
