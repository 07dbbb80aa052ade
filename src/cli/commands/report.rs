use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportContext;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success};
use crate::utils::date::{now_millis, today};

use super::{calculator, open_cache, open_client, resolve_window};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        window,
        json,
        save_advice,
        title,
    } = cmd
    else {
        return Ok(());
    };

    let calc = calculator(cfg)?;
    let w = resolve_window(window, today());
    let client = open_client(cfg)?;
    let profile = client.profile().ok_or_else(|| {
        AppError::Validation("a report needs a profile; run `babysteps profile` or `pull`".into())
    })?;

    let entries = client.entries();
    let ctx = ReportContext::build(
        &calc,
        &profile,
        &entries,
        w.anchor,
        w.unit,
        &w.custom,
        now_millis(),
    );

    if *json {
        println!("{}", ctx.to_json()?);
    } else {
        header(format!("{} report · {}", ctx.report_type.as_str(), ctx.range_label));
        info(format!("{} is {}", ctx.profile.name, ctx.age.describe()));
        info(format!("{} entries in this window", ctx.entries.len()));
    }

    if let Some(content) = save_advice {
        let default_title = format!("{} report {}", ctx.report_type.as_str(), ctx.range_label);
        let title = title.clone().unwrap_or(default_title);
        let entry = ctx.advice_entry(&title, content, now_millis())?;

        let saved = client.create(entry).await?;
        open_cache(cfg)?.audit("add", &saved.id, &saved.describe());
        success(format!("Advice saved as {}", saved.id));
    }

    Ok(())
}
