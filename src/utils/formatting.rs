//! Formatting helpers shared by CLI output and exports.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to a display width; wide (CJK) characters count double.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// `90.0` → `90`, `12.5` → `12.5`.
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

/// Minutes as `01h 05m`, or `01:05` when `short`.
pub fn mins2readable(mins: f64, short: bool) -> String {
    let total = mins.round().max(0.0) as i64;
    let (h, m) = (total / 60, total % 60);

    if short {
        format!("{:02}:{:02}", h, m)
    } else {
        format!("{:02}h {:02}m", h, m)
    }
}
