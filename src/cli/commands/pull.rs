use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use super::{open_cache, open_client};

pub async fn handle(cfg: &Config) -> AppResult<()> {
    let client = open_client(cfg)?;
    let summary = client.pull().await?;

    if !summary.profile {
        warning("No profile on the server yet. Create one with `babysteps profile`.");
    }

    let msg = format!("{} entries pulled from {}", summary.entries, cfg.api_base);
    open_cache(cfg)?.audit("pull", &cfg.api_base, &msg);
    success(msg);
    Ok(())
}
