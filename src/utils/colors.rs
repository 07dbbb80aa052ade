//! ANSI color helpers for terminal output.
use crate::models::entry_type::EntryType;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_type(t: EntryType) -> &'static str {
    match t {
        EntryType::Feeding => BLUE,
        EntryType::Diaper => YELLOW,
        EntryType::Growth => GREEN,
        EntryType::Vaccine => RED,
        EntryType::Supplement => CYAN,
        EntryType::Note => RESET,
        EntryType::Advice => MAGENTA,
    }
}

/// Grey out placeholders ("--", "0", empty).
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "0" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
