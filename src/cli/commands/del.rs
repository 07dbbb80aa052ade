use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, error, info, success, warning};

use super::{open_cache, open_client, retry_hint};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Del { id, yes } = cmd else {
        return Ok(());
    };

    let client = open_client(cfg)?;
    let current_id = client.current_id(id);
    let Some(entry) = client.with_store(|s| s.get(&current_id).cloned()) else {
        return Err(AppError::NotFound(format!("entry {id}")));
    };

    if !*yes {
        warning(format!("Delete {} ({})?", entry.describe(), entry.id));
        if !confirm("This action is irreversible.")? {
            info("Operation cancelled.");
            return Ok(());
        }
    }

    match client.delete(&current_id).await {
        Ok(()) => {
            open_cache(cfg)?.audit("del", &current_id, &entry.describe());
            success(format!("Entry {current_id} has been deleted."));
            Ok(())
        }
        Err(e) => {
            retry_hint(&e);
            error("Not deleted: the entry was restored.");
            Err(e)
        }
    }
}
