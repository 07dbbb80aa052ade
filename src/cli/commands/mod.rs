//! One handler per subcommand, plus the plumbing they share.

pub mod add;
pub mod auth;
pub mod backup;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod profile;
pub mod pull;
pub mod report;
pub mod stats;
pub mod status;

use crate::cli::parser::WindowArgs;
use crate::config::Config;
use crate::core::store::EventStore;
use crate::core::sync::{HttpLogService, SyncClient};
use crate::core::window::{CustomRange, ViewUnit, WindowCalculator, jump_to_today, navigate, resolve_anchor};
use crate::db::cache::LocalCache;
use crate::errors::AppResult;
use crate::utils::path::ensure_parent_dir;
use chrono::{Local, NaiveDate};

pub(crate) fn open_cache(cfg: &Config) -> AppResult<LocalCache> {
    let path = cfg.cache_path();
    ensure_parent_dir(&path)?;
    LocalCache::open(&path.to_string_lossy())
}

/// Entries as last persisted, for read-only views.
pub(crate) fn open_store(cfg: &Config) -> AppResult<EventStore> {
    Ok(EventStore::load(Box::new(open_cache(cfg)?)))
}

pub(crate) fn open_remote(cfg: &Config) -> AppResult<HttpLogService> {
    HttpLogService::new(&cfg.api_base, cfg.token.clone(), cfg.timeout())
}

/// Sync client over the local cache: entries and profile are read from it
/// and every change is written back.
pub(crate) fn open_client(cfg: &Config) -> AppResult<SyncClient<HttpLogService>> {
    let store = open_store(cfg)?;
    Ok(SyncClient::new(open_remote(cfg)?, store).with_profile_cache(Box::new(open_cache(cfg)?)))
}

pub(crate) fn calculator(cfg: &Config) -> AppResult<WindowCalculator<Local>> {
    Ok(WindowCalculator::new(Local, cfg.first_weekday()?))
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedWindow {
    pub anchor: NaiveDate,
    pub unit: ViewUnit,
    pub custom: CustomRange,
}

pub(crate) fn resolve_window(args: &WindowArgs, today: NaiveDate) -> ResolvedWindow {
    if args.today {
        let (anchor, unit) = jump_to_today(today);
        return ResolvedWindow {
            anchor,
            unit,
            custom: CustomRange::default(),
        };
    }

    let custom = CustomRange::new(args.from.as_deref(), args.to.as_deref());
    let unit = if args.from.is_some() || args.to.is_some() {
        ViewUnit::Custom
    } else {
        args.unit
    };
    let anchor = navigate(resolve_anchor(args.date.as_deref(), today), unit, args.shift);

    ResolvedWindow {
        anchor,
        unit,
        custom,
    }
}

pub(crate) fn retry_hint(e: &crate::errors::AppError) {
    if e.is_retryable() {
        crate::ui::messages::info("The server could not be reached or rejected the session; check `api_base` and `babysteps login`, then retry.");
    }
}
