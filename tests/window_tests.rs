mod common;
use babysteps::core::window::{
    CustomRange, TimeWindow, ViewUnit, WindowCalculator, jump_to_today, navigate, resolve_anchor,
};
use chrono::{TimeZone, Utc, Weekday};
use common::{cst, date};

const DAY: i64 = 86_400_000;

fn utc_ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid utc")
        .timestamp_millis()
}

#[test]
fn test_day_window_is_local_midnight_to_midnight() {
    let calc = WindowCalculator::new(cst(), Weekday::Sun);
    let w = calc.window(date("2025-09-01"), ViewUnit::Day, &CustomRange::default());

    // 2025-09-01 00:00 at UTC+8 is 2025-08-31 16:00 UTC.
    assert_eq!(w.start, utc_ms(2025, 8, 31, 16));
    assert_eq!(w.end - w.start, DAY);
    assert!(w.contains(w.start));
    assert!(!w.contains(w.end));
}

#[test]
fn test_week_window_honours_first_weekday() {
    let anchor = date("2025-09-03"); // Wednesday

    let sunday = WindowCalculator::new(Utc, Weekday::Sun);
    let w = sunday.window(anchor, ViewUnit::Week, &CustomRange::default());
    assert_eq!(w.start, utc_ms(2025, 8, 31, 0));
    assert_eq!(w.end, utc_ms(2025, 9, 7, 0));

    let monday = WindowCalculator::new(Utc, Weekday::Mon);
    assert_eq!(monday.first_day_of_week(anchor), date("2025-09-01"));
    assert_eq!(sunday.first_day_of_week(date("2025-08-31")), date("2025-08-31"));
}

#[test]
fn test_month_window_covers_whole_calendar_month() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let w = calc.window(date("2025-02-14"), ViewUnit::Month, &CustomRange::default());

    assert_eq!(w.start, utc_ms(2025, 2, 1, 0));
    assert_eq!(w.end, utc_ms(2025, 3, 1, 0));
    assert_eq!((w.end - w.start) / DAY, 28);
}

#[test]
fn test_custom_window_includes_whole_end_day() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let custom = CustomRange::new(Some("2025-09-01"), Some("2025-09-03"));
    let w = calc.window(date("2025-01-01"), ViewUnit::Custom, &custom);

    assert_eq!(w.start, utc_ms(2025, 9, 1, 0));
    assert_eq!(w.end, utc_ms(2025, 9, 4, 0) - 1);
    assert!(w.contains(utc_ms(2025, 9, 3, 23)));
    assert!(!w.contains(utc_ms(2025, 9, 4, 0)));
}

#[test]
fn test_custom_window_open_sides_are_unbounded() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let anchor = date("2025-09-01");

    let open_end = calc.window(anchor, ViewUnit::Custom, &CustomRange::new(Some("2025-09-01"), None));
    assert_eq!(open_end.end, TimeWindow::UNBOUNDED_END);
    assert!(open_end.has_start());
    assert!(!open_end.is_bounded());

    let open = calc.window(anchor, ViewUnit::Custom, &CustomRange::default());
    assert_eq!(open, TimeWindow::unbounded());
    assert!(open.contains(0));
}

#[test]
fn test_inverted_custom_window_is_empty() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let custom = CustomRange::new(Some("2025-09-10"), Some("2025-09-01"));
    let w = calc.window(date("2025-09-01"), ViewUnit::Custom, &custom);

    assert!(w.is_empty());
    assert!(!w.contains(w.start));
}

#[test]
fn test_navigate_steps_by_unit() {
    assert_eq!(navigate(date("2025-09-01"), ViewUnit::Day, -1), date("2025-08-31"));
    assert_eq!(navigate(date("2025-09-01"), ViewUnit::Week, 2), date("2025-09-15"));
    assert_eq!(navigate(date("2025-01-31"), ViewUnit::Month, 1), date("2025-02-28"));
    assert_eq!(navigate(date("2025-03-15"), ViewUnit::Month, -3), date("2024-12-15"));
    assert_eq!(navigate(date("2025-09-01"), ViewUnit::Custom, 5), date("2025-09-01"));
}

#[test]
fn test_today_and_unreadable_anchor() {
    let today = date("2026-10-18");

    assert_eq!(jump_to_today(today), (today, ViewUnit::Day));
    assert_eq!(resolve_anchor(None, today), today);
    assert_eq!(resolve_anchor(Some("not-a-date"), today), today);
    assert_eq!(resolve_anchor(Some("2025-09-01T00:00:00.000Z"), today), date("2025-09-01"));
}

#[test]
fn test_range_labels() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let anchor = date("2025-09-03");
    let none = CustomRange::default();

    let day = calc.window(anchor, ViewUnit::Day, &none);
    assert_eq!(calc.range_label(ViewUnit::Day, anchor, &day, &none), "2025-09-03");

    let week = calc.window(anchor, ViewUnit::Week, &none);
    assert_eq!(
        calc.range_label(ViewUnit::Week, anchor, &week, &none),
        "2025-08-31 ~ 2025-09-06"
    );

    let month = calc.window(anchor, ViewUnit::Month, &none);
    assert_eq!(calc.range_label(ViewUnit::Month, anchor, &month, &none), "2025-09");

    let custom = CustomRange::new(Some("2025-09-01"), None);
    let w = calc.window(anchor, ViewUnit::Custom, &custom);
    assert_eq!(calc.range_label(ViewUnit::Custom, anchor, &w, &custom), "2025-09-01 ~ …");
}

#[test]
fn test_friday_anchor_starts_on_preceding_sunday() {
    let calc = WindowCalculator::new(cst(), Weekday::Sun);
    let w = calc.window(date("2025-09-05"), ViewUnit::Week, &CustomRange::default());
    let sunday = calc.window(date("2025-08-31"), ViewUnit::Day, &CustomRange::default());

    assert_eq!(w.start, sunday.start);
    assert_eq!(w.end - w.start, 7 * DAY);
}

#[test]
fn test_december_rolls_into_next_year() {
    let calc = WindowCalculator::new(Utc, Weekday::Sun);
    let w = calc.window(date("2025-12-31"), ViewUnit::Month, &CustomRange::default());

    assert_eq!(w.start, utc_ms(2025, 12, 1, 0));
    assert_eq!(w.end, utc_ms(2026, 1, 1, 0));
    assert_eq!(navigate(date("2025-12-10"), ViewUnit::Month, 1), date("2026-01-10"));
}

#[test]
fn test_navigate_forward_then_back_is_identity() {
    let calc = WindowCalculator::new(cst(), Weekday::Sun);
    let none = CustomRange::default();

    for anchor in ["2025-01-15", "2025-03-01", "2024-02-29", "2025-12-31"] {
        let anchor = date(anchor);
        for unit in [ViewUnit::Day, ViewUnit::Week, ViewUnit::Month] {
            let back = navigate(navigate(anchor, unit, 1), unit, -1);
            assert_eq!(
                calc.window(back, unit, &none),
                calc.window(anchor, unit, &none),
                "{anchor} {unit:?}"
            );
        }
    }
}

mod dst {
    use super::*;
    use chrono_tz::America::{New_York, Sao_Paulo};

    const HOUR: i64 = 3_600_000;

    #[test]
    fn test_day_window_spans_23h_on_spring_forward() {
        let calc = WindowCalculator::new(New_York, Weekday::Sun);
        let w = calc.window(date("2025-03-09"), ViewUnit::Day, &CustomRange::default());

        assert_eq!(w.start, utc_ms(2025, 3, 9, 5));
        assert_eq!(w.end - w.start, 23 * HOUR);
    }

    #[test]
    fn test_day_window_spans_25h_on_fall_back() {
        let calc = WindowCalculator::new(New_York, Weekday::Sun);
        let w = calc.window(date("2025-11-02"), ViewUnit::Day, &CustomRange::default());

        assert_eq!(w.start, utc_ms(2025, 11, 2, 4));
        assert_eq!(w.end - w.start, 25 * HOUR);
    }

    #[test]
    fn test_month_window_counts_calendar_days_across_dst() {
        let calc = WindowCalculator::new(New_York, Weekday::Sun);
        let march = calc.window(date("2025-03-17"), ViewUnit::Month, &CustomRange::default());
        assert_eq!(march.end - march.start, 31 * DAY - HOUR);

        let november = calc.window(date("2025-11-20"), ViewUnit::Month, &CustomRange::default());
        assert_eq!(november.end - november.start, 30 * DAY + HOUR);
    }

    #[test]
    fn test_missing_midnight_starts_at_first_valid_hour() {
        // Clocks went from 00:00 -03 straight to 01:00 -02.
        let calc = WindowCalculator::new(Sao_Paulo, Weekday::Sun);
        let w = calc.window(date("2018-11-04"), ViewUnit::Day, &CustomRange::default());

        assert_eq!(w.start, utc_ms(2018, 11, 4, 3));
        assert_eq!(w.end, utc_ms(2018, 11, 5, 2));
        assert_eq!(w.end - w.start, 23 * HOUR);
    }
}
