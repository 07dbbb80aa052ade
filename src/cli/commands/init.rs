use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

use super::open_cache;

/// Handle the `init` command
///
/// Creates the config directory, the configuration file (skipped in test
/// mode) and the local cache with all pending migrations applied.
pub fn handle(cli: &Cli, current: &Config) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.cache.as_deref(), cli.test)?;
    if cli.api.is_some() {
        cfg.api_base = current.api_base.clone();
    }

    info("Initializing babysteps…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Cache       : {}", cfg.cache_path().display()));
    info(format!("Remote API  : {}", cfg.api_base));

    let cache = open_cache(&cfg)?;
    cache.audit(
        "init",
        "cache",
        &format!("Cache initialized at {}", cfg.cache_path().display()),
    );

    success("babysteps initialization completed!");
    Ok(())
}
