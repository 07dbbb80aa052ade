use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::ProfileCache;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ImportLogic};
use crate::ui::messages::{confirm, info, success, warning};
use chrono::Local;

use super::{open_cache, open_store};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Export {
            file,
            format,
            range,
            force,
        } => {
            let store = open_store(cfg)?;
            let profile = open_cache(cfg)?.load_profile()?;
            ExportLogic::export(
                &Local,
                store.all(),
                profile.as_ref(),
                *format,
                file,
                range.as_deref(),
                *force,
            )?;
        }
        Commands::Import { file, force } => {
            let backup = ImportLogic::read(file)?;
            let count = backup.logs.len();

            let mut store = open_store(cfg)?;
            if ImportLogic::is_older(&backup, store.all()) {
                warning("The file is older than the local data; newer entries will be lost.");
                if !*force && !confirm("Import anyway?")? {
                    info("Import cancelled.");
                    return Ok(());
                }
            }

            let before = store.len();
            store.hydrate(backup.logs);
            info(format!("Replaced {before} cached entries"));

            let mut cache = open_cache(cfg)?;
            if let Some(profile) = &backup.profile {
                cache.save_profile(profile)?;
                info(format!("Profile replaced: {}", profile.name));
            }
            cache.audit("import", file, &format!("{count} entries imported"));
            success(format!("{} entries imported from {file}", store.len()));
        }
        _ => {}
    }

    Ok(())
}
