use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::ui::messages::{info, warning};
use crate::utils::path::ensure_parent_dir;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the cache file to `dest`, optionally as a `.zip`. Returns the
    /// path actually written.
    pub fn backup(cache_path: &Path, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if !cache_path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("cache not found: {}", cache_path.display()),
            )));
        }

        ensure_parent_dir(dest)?;
        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_path, force)?;

        if compress {
            compress_into(cache_path, &final_path)?;
        } else {
            fs::copy(cache_path, &final_path)?;
        }

        Ok(final_path)
    }
}

fn compress_into(src: &Path, zip_path: &Path) -> AppResult<()> {
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "babysteps.sqlite".to_string());

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let write = |zip: &mut ZipWriter<fs::File>| -> AppResult<()> {
        zip.start_file(name.as_str(), options)
            .map_err(|e| AppError::Export(format!("zip: {e}")))?;
        let mut f = fs::File::open(src)?;
        std::io::copy(&mut f, zip)?;
        Ok(())
    };

    if let Err(e) = write(&mut zip) {
        if let Err(rm) = fs::remove_file(zip_path) {
            warning(format!("could not remove partial archive: {rm}"));
        }
        return Err(e);
    }

    zip.finish()
        .map_err(|e| AppError::Export(format!("zip: {e}")))?;
    info(format!("Compressed: {}", zip_path.display()));
    Ok(())
}
