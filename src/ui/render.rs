//! Terminal rendering of window views and status.

use crate::core::calculator::buckets::{Bucket, Metric, Metrics};
use crate::core::calculator::groups::ExpansionState;
use crate::core::calculator::summary::{Latest, Status};
use crate::core::logic::WindowView;
use crate::models::entry::Entry;
use crate::utils::colors::{GREY, RESET, color_for_type, colorize_optional};
use crate::utils::formatting::{bold, fmt_num, mins2readable};
use crate::utils::table::Table;
use chrono::TimeZone;

pub fn window_title(view: &WindowView) -> String {
    format!("{} · {}", view.unit.as_str(), view.label)
}

pub fn print_groups<Tz: TimeZone>(tz: &Tz, view: &WindowView, expansion: &ExpansionState)
where
    Tz::Offset: std::fmt::Display,
{
    if view.groups.is_empty() {
        println!("{GREY}No entries in this window.{RESET}");
        return;
    }

    for group in &view.groups {
        let marker = if expansion.is_expanded(group.date) { "▾" } else { "▸" };
        println!(
            "{marker} {} {GREY}({} entries){RESET}",
            bold(&group.label()),
            group.entries.len()
        );
        if expansion.is_expanded(group.date) {
            for e in &group.entries {
                println!("    {}", entry_line(tz, e));
            }
        }
    }
}

pub fn entry_line<Tz: TimeZone>(tz: &Tz, e: &Entry) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = e
        .local_time(tz)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".into());
    let t = e.entry_type();

    format!(
        "{time}  {}{} {}{RESET}  {GREY}{}{RESET}",
        color_for_type(t),
        t.icon(),
        e.describe(),
        e.id
    )
}

pub fn print_buckets(buckets: &[Bucket]) {
    let mut table = Table::new(
        std::iter::once("slot".to_string())
            .chain(Metric::ALL.iter().map(|m| m.label().to_string())),
    );

    for b in buckets {
        let mut row = vec![b.label.clone()];
        row.extend(Metric::ALL.iter().map(|m| colorize_optional(&fmt_num(b.metrics.get(*m)))));
        table.add_row(row);
    }

    if table.is_empty() {
        println!("{GREY}No slots in this window.{RESET}");
    } else {
        print!("{}", table.render());
    }
}

pub fn print_totals(totals: &Metrics, breast_feedings: usize, bottle_feedings: usize) {
    println!(
        "Breastfeeding : {} in {} feedings",
        mins2readable(totals.get(Metric::BreastMinutes), false),
        breast_feedings
    );
    println!(
        "Bottle        : {} ml in {} feedings",
        fmt_num(totals.get(Metric::BottleMl)),
        bottle_feedings
    );
    println!("Solids        : {}", fmt_num(totals.get(Metric::SolidAmount)));
    println!(
        "Diapers       : {} wet / {} dirty",
        fmt_num(totals.get(Metric::Wet)),
        fmt_num(totals.get(Metric::Dirty))
    );
    println!("Supplements   : {}", fmt_num(totals.get(Metric::Supplements)));
}

pub fn print_status<Tz: TimeZone>(tz: &Tz, status: &Status)
where
    Tz::Offset: std::fmt::Display,
{
    let rows: [(&str, &Option<Latest>); 5] = [
        ("Breast", &status.breast),
        ("Bottle", &status.bottle),
        ("Formula", &status.formula),
        ("Diaper", &status.diaper),
        ("Supplement", &status.supplement),
    ];

    let mut table = Table::new(["", "last", "since"]);
    for (label, latest) in rows {
        match latest {
            Some(l) => table.add_row(vec![
                label.to_string(),
                entry_line(tz, &l.entry),
                l.elapsed.clone(),
            ]),
            None => table.add_row(vec![label.to_string(), colorize_optional("--"), String::new()]),
        }
    }
    print!("{}", table.render());
}
