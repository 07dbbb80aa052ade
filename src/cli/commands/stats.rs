use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::groups::TypeFilter;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::{print_buckets, print_totals, window_title};
use crate::utils::date::today;
use serde_json::json;

use super::{calculator, open_store, resolve_window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Stats { window, json } = cmd else {
        return Ok(());
    };

    let calc = calculator(cfg)?;
    let w = resolve_window(window, today());
    let store = open_store(cfg)?;

    // Stats ignore type filters.
    let view = Core::build_window_view(
        &calc,
        store.all(),
        w.anchor,
        w.unit,
        &w.custom,
        &TypeFilter::all(),
    );

    if *json {
        let out = json!({
            "unit": view.unit,
            "label": view.label,
            "window": view.window,
            "buckets": view.buckets,
            "totals": view.summary.totals,
            "breastFeedings": view.summary.breast_feedings,
            "bottleFeedings": view.summary.bottle_feedings,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    header(window_title(&view));
    print_buckets(&view.buckets);
    println!();
    print_totals(
        &view.summary.totals,
        view.summary.breast_feedings,
        view.summary.bottle_feedings,
    );
    Ok(())
}
