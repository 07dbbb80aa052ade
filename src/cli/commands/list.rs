use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::groups::{ExpansionState, TypeFilter};
use crate::core::logic::Core;
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::ui::messages::header;
use crate::ui::render::{print_groups, window_title};
use crate::utils::date::today;
use chrono::Local;

use super::{calculator, open_store, resolve_window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List {
        window,
        types,
        expand,
    } = cmd
    else {
        return Ok(());
    };

    let filter = parse_filter(types)?;
    let calc = calculator(cfg)?;
    let w = resolve_window(window, today());
    let store = open_store(cfg)?;

    let view = Core::build_window_view(&calc, store.all(), w.anchor, w.unit, &w.custom, &filter);

    let mut expansion = ExpansionState::new();
    if *expand {
        for g in &view.groups {
            expansion.expand(g.date);
        }
    } else {
        expansion.seed_default(&view.groups);
    }

    header(window_title(&view));
    print_groups(&Local, &view, &expansion);
    Ok(())
}

fn parse_filter(types: &[String]) -> AppResult<TypeFilter> {
    let parsed = types
        .iter()
        .map(|t| EntryType::et_from_str(t).ok_or_else(|| AppError::InvalidEntryType(t.clone())))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(TypeFilter::only(&parsed))
}
