use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{BLUE, GREEN, MAGENTA, RED, RESET, YELLOW};
use crate::utils::table::Table;

use super::open_cache;

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" | "import" | "pull" => GREEN,
        "del" => RED,
        "edit" | "profile" => YELLOW,
        "migration_applied" => MAGENTA,
        "backup" | "init" | "login" => BLUE,
        _ => RESET,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        info("Nothing to do: use --print to show the internal log.");
        return Ok(());
    }

    let mut cache = open_cache(cfg)?;
    let rows = load_log(&cache.pool().conn)?;

    header("Internal log");
    let mut table = Table::new(["id", "date", "operation", "message"]);
    for r in rows {
        let date = chrono::DateTime::parse_from_rfc3339(&r.date)
            .map(|dt| dt.format("%F %T").to_string())
            .unwrap_or(r.date);
        let op = if r.target.is_empty() {
            r.operation.clone()
        } else {
            format!("{} ({})", r.operation, truncate(&r.target, 40))
        };
        let color = color_for_operation(&r.operation);

        table.add_row(vec![r.id.to_string(), date, format!("{color}{op}{RESET}"), r.message]);
    }
    print!("{}", table.render());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
