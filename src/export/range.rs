use crate::errors::{AppError, AppResult};
use chrono::{Months, NaiveDate};

/// Parse an export range into inclusive dates.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `A:B` where both sides use
/// the same one of those shapes.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match r.split_once(':') {
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.len() != b.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            let (start, _) = period(a).ok_or_else(|| invalid(r, "bad start"))?;
            let (_, end) = period(b).ok_or_else(|| invalid(r, "bad end"))?;
            if start > end {
                return Err(invalid(r, "start is after end"));
            }
            Ok((start, end))
        }
        None => period(r.trim()).ok_or_else(|| invalid(r, "unsupported format")),
    }
}

/// First and last day of a year, month or single day.
fn period(s: &str) -> Option<(NaiveDate, NaiveDate)> {
    match s.len() {
        4 => {
            let y: i32 = s.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()?;
            let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
            Some((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("range '{r}': {why}"))
}
