use crate::cli::parser::{Commands, EntryArgs, EntryKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{
    Advice, Diaper, Entry, EntryDetails, Feeding, Growth, NoteText, Supplement, Vaccine,
};
use crate::models::entry_type::{DiaperStatus, FeedingMethod, FeedingSide, GrowthCategory};
use crate::ui::messages::{error, info, success};
use crate::utils::date::{local_millis, now_millis, parse_datetime, today};
use chrono::{Local, NaiveDate};

use super::{open_cache, open_client, retry_hint};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Add { common, kind } => {
            let entry = build_entry(kind, common, now_millis(), None, today())?;
            let client = open_client(cfg)?;

            info(format!("Saving {}…", entry.describe()));
            match client.create(entry).await {
                Ok(saved) => {
                    open_cache(cfg)?.audit("add", &saved.id, &saved.describe());
                    success(format!("Saved as {}", saved.id));
                    Ok(())
                }
                Err(e) => {
                    retry_hint(&e);
                    error("Not saved: the entry was removed from the local log.");
                    Err(e)
                }
            }
        }
        Commands::Edit { id, common, kind } => {
            let client = open_client(cfg)?;
            let current_id = client.current_id(id);
            let existing = client
                .with_store(|s| s.get(&current_id).cloned())
                .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;

            let mut entry = build_entry(kind, common, existing.timestamp, existing.note, today())?;
            entry.id = current_id;

            match client.update(entry).await {
                Ok(saved) => {
                    open_cache(cfg)?.audit("edit", &saved.id, &saved.describe());
                    success(format!("Updated {}", saved.id));
                    Ok(())
                }
                Err(e) => {
                    retry_hint(&e);
                    error("Not saved: the previous version was restored.");
                    Err(e)
                }
            }
        }
        _ => Ok(()),
    }
}

/// Turn command-line fields into an entry. `timestamp` and `note` are used
/// when `--at` / `--note` are absent.
pub fn build_entry(
    kind: &EntryKind,
    common: &EntryArgs,
    timestamp: i64,
    note: Option<String>,
    today: NaiveDate,
) -> AppResult<Entry> {
    let timestamp = match &common.at {
        Some(raw) => {
            let naive =
                parse_datetime(raw, today).ok_or_else(|| AppError::InvalidTime(raw.clone()))?;
            local_millis(&Local, naive)
        }
        None => timestamp,
    };

    let details = match kind {
        EntryKind::Feeding {
            method,
            amount,
            duration,
            left,
            right,
            side,
        } => {
            let method = FeedingMethod::from_code(method)
                .ok_or_else(|| AppError::InvalidEntryType(format!("feeding method '{method}'")))?;
            let side = side
                .as_deref()
                .map(|s| {
                    FeedingSide::from_code(s)
                        .ok_or_else(|| AppError::Validation(format!("unknown side '{s}'")))
                })
                .transpose()?;

            let mut f = Feeding::new(method);
            f.amount = *amount;
            f.duration = *duration;
            f.left_duration = *left;
            f.right_duration = *right;
            f.side = side;
            EntryDetails::Feeding(f)
        }
        EntryKind::Diaper { status } => EntryDetails::Diaper(Diaper {
            status: DiaperStatus::from_code(status)
                .ok_or_else(|| AppError::InvalidEntryType(format!("diaper status '{status}'")))?,
        }),
        EntryKind::Growth {
            event,
            category,
            weight,
            height,
        } => EntryDetails::Growth(Growth {
            event_name: event.clone(),
            category: GrowthCategory::from_code(category)
                .ok_or_else(|| AppError::InvalidEntryType(format!("growth category '{category}'")))?,
            weight: *weight,
            height: *height,
        }),
        EntryKind::Vaccine { name, next } => EntryDetails::Vaccine(Vaccine {
            vaccine_name: name.clone(),
            next_dose_date: next.clone(),
        }),
        EntryKind::Supplement { name, dosage } => EntryDetails::Supplement(Supplement {
            name: name.clone(),
            dosage: dosage.clone(),
        }),
        EntryKind::Note { content } => EntryDetails::Note(NoteText {
            content: content.clone(),
        }),
        EntryKind::Advice {
            title,
            content,
            report_type,
        } => EntryDetails::Advice(Advice {
            title: title.clone(),
            content: content.clone(),
            report_type: *report_type,
        }),
    };

    let entry = Entry::new(timestamp, details).with_note(common.note.clone().or(note));
    entry.validate()?;
    Ok(entry)
}
