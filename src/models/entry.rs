use super::entry_type::{DiaperStatus, EntryType, FeedingMethod, FeedingSide, GrowthCategory};
use crate::core::window::ViewUnit;
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::fmt_num;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// One logged child-care event.
///
/// Wire shape: `{ id, type, timestamp, note?, ...type-specific fields }`.
/// `id` is empty for an entry that was never assigned one; locally created
/// entries carry a temporary id until the remote service acknowledges them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    /// Epoch millis.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryDetails {
    Feeding(Feeding),
    Diaper(Diaper),
    Growth(Growth),
    Vaccine(Vaccine),
    Supplement(Supplement),
    Note(NoteText),
    Advice(Advice),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feeding {
    pub method: FeedingMethod,
    /// ml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<FeedingSide>,
}

impl Feeding {
    pub fn new(method: FeedingMethod) -> Self {
        Self {
            method,
            amount: None,
            duration: None,
            left_duration: None,
            right_duration: None,
            side: None,
        }
    }

    /// Breastfeeding minutes: the explicit total, else the per-side sum.
    pub fn total_minutes(&self) -> f64 {
        match self.duration {
            Some(d) => d,
            None => self.left_duration.unwrap_or(0.0) + self.right_duration.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diaper {
    pub status: DiaperStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub event_name: String,
    pub category: GrowthCategory,
    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub vaccine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_dose_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteText {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<ViewUnit>,
}

impl Entry {
    pub fn new(timestamp: i64, details: EntryDetails) -> Self {
        Self {
            id: String::new(),
            timestamp,
            note: None,
            details,
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn entry_type(&self) -> EntryType {
        match &self.details {
            EntryDetails::Feeding(_) => EntryType::Feeding,
            EntryDetails::Diaper(_) => EntryType::Diaper,
            EntryDetails::Growth(_) => EntryType::Growth,
            EntryDetails::Vaccine(_) => EntryType::Vaccine,
            EntryDetails::Supplement(_) => EntryType::Supplement,
            EntryDetails::Note(_) => EntryType::Note,
            EntryDetails::Advice(_) => EntryType::Advice,
        }
    }

    pub fn feeding(&self) -> Option<&Feeding> {
        match &self.details {
            EntryDetails::Feeding(f) => Some(f),
            _ => None,
        }
    }

    pub fn diaper(&self) -> Option<&Diaper> {
        match &self.details {
            EntryDetails::Diaper(d) => Some(d),
            _ => None,
        }
    }

    /// The entry's instant in the given zone; `None` for out-of-range millis.
    pub fn local_time<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp_millis(self.timestamp).map(|utc| utc.with_timezone(tz))
    }

    /// Reject entries that must never reach the sync layer.
    pub fn validate(&self) -> AppResult<()> {
        fn required(field: &str, value: &str) -> AppResult<()> {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} must not be empty")));
            }
            Ok(())
        }
        fn non_negative(field: &str, value: Option<f64>) -> AppResult<()> {
            match value {
                Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::Validation(format!(
                    "{field} must be a non-negative number (got {v})"
                ))),
                _ => Ok(()),
            }
        }

        if self.timestamp < 0 {
            return Err(AppError::Validation(format!(
                "timestamp must not be negative (got {})",
                self.timestamp
            )));
        }

        match &self.details {
            EntryDetails::Feeding(f) => {
                non_negative("amount", f.amount)?;
                non_negative("duration", f.duration)?;
                non_negative("leftDuration", f.left_duration)?;
                non_negative("rightDuration", f.right_duration)
            }
            EntryDetails::Diaper(_) => Ok(()),
            EntryDetails::Growth(g) => {
                required("eventName", &g.event_name)?;
                non_negative("weight", g.weight)?;
                non_negative("height", g.height)
            }
            EntryDetails::Vaccine(v) => required("vaccineName", &v.vaccine_name),
            EntryDetails::Supplement(s) => required("name", &s.name),
            EntryDetails::Note(n) => required("content", &n.content),
            EntryDetails::Advice(a) => {
                required("title", &a.title)?;
                required("content", &a.content)
            }
        }
    }

    /// One-line human description used by list/status output.
    pub fn describe(&self) -> String {
        let body = match &self.details {
            EntryDetails::Feeding(f) => {
                let qty = match f.method {
                    FeedingMethod::Breast => format!("{} min", fmt_num(f.total_minutes())),
                    _ => match f.amount {
                        Some(a) => format!("{} ml", fmt_num(a)),
                        None => "--".to_string(),
                    },
                };
                format!("feeding {} {}", f.method.as_str(), qty)
            }
            EntryDetails::Diaper(d) => format!("diaper {}", d.status.as_str()),
            EntryDetails::Growth(g) => {
                let mut s = format!("growth {}", g.event_name);
                if let Some(w) = g.weight {
                    s.push_str(&format!(" {} kg", fmt_num(w)));
                }
                if let Some(h) = g.height {
                    s.push_str(&format!(" {} cm", fmt_num(h)));
                }
                s
            }
            EntryDetails::Vaccine(v) => format!("vaccine {}", v.vaccine_name),
            EntryDetails::Supplement(s) => match &s.dosage {
                Some(d) => format!("supplement {} {}", s.name, d),
                None => format!("supplement {}", s.name),
            },
            EntryDetails::Note(n) => format!("note {}", n.content),
            EntryDetails::Advice(a) => format!("advice {}", a.title),
        };

        match &self.note {
            Some(n) => format!("{body} ({n})"),
            None => body,
        }
    }
}
