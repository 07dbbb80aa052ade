mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod range;

pub use fs_utils::ensure_writable;
pub use logic::{ExportLogic, ImportLogic};
pub use model::{BACKUP_VERSION, Backup, EntryExport};
pub use range::parse_range;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path, count: usize) {
    success(format!(
        "{label} export completed: {count} entries → {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Profile and wire-shaped entries; can be imported back.
    Json,
    /// One flat row per entry.
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}
