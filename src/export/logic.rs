use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{Backup, EntryExport};
use crate::export::range::parse_range;
use crate::export::{ExportFormat, ensure_writable};
use crate::models::entry::Entry;
use crate::models::profile::Profile;
use crate::ui::messages::warning;
use crate::utils::date::local_date;
use chrono::{NaiveDate, TimeZone};
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the entries of `range` (`None` or `"all"` = everything),
    /// oldest first. JSON output also carries `profile`. Returns how many
    /// entries were written.
    pub fn export<Tz: TimeZone>(
        tz: &Tz,
        entries: &[Entry],
        profile: Option<&Profile>,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize>
    where
        Tz::Offset: std::fmt::Display,
    {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let mut selected: Vec<Entry> = entries
            .iter()
            .filter(|e| match bounds {
                None => true,
                Some((from, to)) => {
                    local_date(tz, e.timestamp).is_some_and(|d| d >= from && d <= to)
                }
            })
            .cloned()
            .collect();

        if selected.is_empty() {
            warning("No entries found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;
        selected.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        debug!(count = selected.len(), format = format.as_str(), "exporting");

        match format {
            ExportFormat::Json => {
                let count = selected.len();
                export_json(&Backup::new(profile.cloned(), selected), path)?;
                return Ok(count);
            }
            ExportFormat::Csv => {
                let rows: Vec<EntryExport> = selected
                    .iter()
                    .map(|e| EntryExport::from_entry(tz, e))
                    .collect();
                export_csv(&rows, path)?
            }
        }

        Ok(selected.len())
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Read a data file: either a full backup (`{version, exportDate,
    /// profile, logs}`) or a bare entry array such as a remote `/logs` dump.
    /// Every entry and the profile must validate; entries without an id get
    /// a local one.
    pub fn read(file: &str) -> AppResult<Backup> {
        let raw = fs::read_to_string(file)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        let mut backup = if value.is_array() {
            Backup {
                version: String::new(),
                export_date: None,
                profile: None,
                logs: serde_json::from_value(value)?,
            }
        } else {
            serde_json::from_value::<Backup>(value)?
        };

        if let Some(p) = &backup.profile {
            p.validate()
                .map_err(|err| AppError::Validation(format!("profile: {err}")))?;
        }
        for (i, e) in backup.logs.iter_mut().enumerate() {
            e.validate()
                .map_err(|err| AppError::Validation(format!("entry #{}: {err}", i + 1)))?;
            if e.id.trim().is_empty() {
                e.id = format!("import-{}-{}", e.timestamp, i + 1);
            }
        }

        debug!(
            entries = backup.logs.len(),
            profile = backup.profile.is_some(),
            version = %backup.version,
            "data file read"
        );
        Ok(backup)
    }

    /// True when `current` holds an entry newer than anything in `backup`.
    pub fn is_older(backup: &Backup, current: &[Entry]) -> bool {
        current
            .iter()
            .map(|e| e.timestamp)
            .max()
            .is_some_and(|newest| backup.newest() < newest)
    }
}
