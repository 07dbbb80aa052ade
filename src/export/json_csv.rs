use crate::errors::{AppError, AppResult};
use crate::export::{Backup, EntryExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed wire form, readable by `import`.
pub(crate) fn export_json(backup: &Backup, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, backup)?;
    file.write_all(b"\n")?;
    file.flush()?;

    notify_export_success("JSON", path, backup.logs.len());
    Ok(())
}

/// Header row comes from the `EntryExport` field names.
pub(crate) fn export_csv(rows: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}
