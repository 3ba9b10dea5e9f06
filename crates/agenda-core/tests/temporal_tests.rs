//! Tests for date, clock time and temporal value parsing.

use agenda_core::{
    CalendarDate, ClockTime, DateFormat, ParseOptions, TemporalError, TemporalValue, YearRange,
};

fn week_options() -> ParseOptions {
    ParseOptions {
        format: DateFormat::WeekdayWeekYear,
        ..ParseOptions::default()
    }
}

fn value(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> TemporalValue {
    TemporalValue::from_fields(year, month, day, hour, minute, &YearRange::default()).unwrap()
}

fn is_malformed<T: std::fmt::Debug>(result: Result<T, TemporalError>) -> bool {
    matches!(result, Err(TemporalError::MalformedInput(_)))
}

fn is_invalid_calendar<T: std::fmt::Debug>(result: Result<T, TemporalError>) -> bool {
    matches!(result, Err(TemporalError::InvalidCalendarValue(_)))
}

// ── Day/month/year dates ──────────────────────────────────────────────

#[test]
fn parses_day_month_year() {
    let date = CalendarDate::parse("05/07/2012", &ParseOptions::default()).unwrap();
    assert_eq!((date.day(), date.month(), date.year()), (5, 7, 2012));
}

#[test]
fn accepts_single_digit_day_and_month() {
    let date = CalendarDate::parse("6/5/2012", &ParseOptions::default()).unwrap();
    assert_eq!(date.to_date_string(), "06/05/2012");
}

#[test]
fn accepts_leap_day_only_in_leap_years() {
    let options = ParseOptions::default();
    assert!(CalendarDate::parse("29/02/2012", &options).is_ok());
    assert!(is_invalid_calendar(CalendarDate::parse("29/02/2011", &options)));
}

#[test]
fn rejects_day_past_month_end() {
    let options = ParseOptions::default();
    assert!(is_invalid_calendar(CalendarDate::parse("31/04/2012", &options)));
    assert!(is_invalid_calendar(CalendarDate::parse("00/04/2012", &options)));
}

#[test]
fn rejects_month_out_of_range() {
    let options = ParseOptions::default();
    assert!(is_invalid_calendar(CalendarDate::parse("10/13/2012", &options)));
    assert!(is_invalid_calendar(CalendarDate::parse("10/00/2012", &options)));
}

#[test]
fn rejects_year_outside_configured_range() {
    let options = ParseOptions {
        years: YearRange::new(2012, 2013).unwrap(),
        ..ParseOptions::default()
    };
    assert!(CalendarDate::parse("31/12/2013", &options).is_ok());
    assert!(is_invalid_calendar(CalendarDate::parse("01/01/2014", &options)));
    assert!(is_invalid_calendar(CalendarDate::parse("31/12/2011", &options)));
}

#[test]
fn grammar_is_checked_before_values() {
    let options = ParseOptions::default();
    assert!(is_malformed(CalendarDate::parse("1/1/12", &options)));
    assert!(is_malformed(CalendarDate::parse("2012-07-05", &options)));
    assert!(is_malformed(CalendarDate::parse(" 05/07/2012", &options)));
    assert!(is_malformed(CalendarDate::parse("05/07/2012 ", &options)));
    assert!(is_malformed(CalendarDate::parse("", &options)));
    // Absurd values in the right shape are a value error, not a grammar one.
    assert!(is_invalid_calendar(CalendarDate::parse("99/99/2012", &options)));
}

#[test]
fn day_past_january_and_missing_year() {
    let options = ParseOptions::default();
    assert!(is_invalid_calendar(CalendarDate::parse("32/01/2012", &options)));
    assert!(is_malformed(CalendarDate::parse("12/02", &options)));
    assert!(is_invalid_calendar(TemporalValue::parse("32/01/2012", "9h00", &options)));
    assert!(is_malformed(TemporalValue::parse("12/02", "9h00", &options)));
}

#[test]
fn only_ascii_digits_fit_the_grammar() {
    let options = ParseOptions::default();
    assert!(is_malformed(CalendarDate::parse("\u{660}\u{665}/07/2012", &options)));
    assert!(is_malformed(CalendarDate::parse("05/07/\u{662}\u{660}\u{661}\u{662}", &options)));
    assert!(is_malformed(CalendarDate::parse(
        "jeudi semaine \u{661}\u{661} 2012",
        &week_options()
    )));
    assert!(is_malformed(ClockTime::parse("\u{669}h00")));
}

#[test]
fn day_month_year_text_is_refused_in_week_notation() {
    assert!(is_malformed(CalendarDate::parse("05/07/2012", &week_options())));
}

// ── Weekday/week/year dates ───────────────────────────────────────────

#[test]
fn parses_week_date() {
    let date = CalendarDate::parse("jeudi semaine 11 2012", &week_options()).unwrap();
    assert_eq!(date.to_date_string(), "15/03/2012");
    assert_eq!(date.weekday(), 4);
    assert_eq!(date.week_number(), 11);
}

#[test]
fn week_date_accepts_english_and_any_case() {
    let french = CalendarDate::parse("jeudi semaine 11 2012", &week_options()).unwrap();
    let english = CalendarDate::parse("Thursday semaine 11 2012", &week_options()).unwrap();
    let shouting = CalendarDate::parse("JEUDI semaine 11 2012", &week_options()).unwrap();
    assert_eq!(french, english);
    assert_eq!(french, shouting);
}

#[test]
fn week_date_accepts_nine_letter_weekday() {
    let date = CalendarDate::parse("Wednesday semaine 11 2012", &week_options()).unwrap();
    assert_eq!(date.to_date_string(), "14/03/2012");
}

#[test]
fn week_zero_holds_days_before_first_monday() {
    let date = CalendarDate::parse("dimanche semaine 0 2012", &week_options()).unwrap();
    assert_eq!(date.to_date_string(), "01/01/2012");

    let date = CalendarDate::parse("vendredi semaine 0 2010", &week_options()).unwrap();
    assert_eq!(date.to_date_string(), "01/01/2010");
}

#[test]
fn week_53_runs_into_next_year() {
    let monday = CalendarDate::parse("lundi semaine 53 2012", &week_options()).unwrap();
    assert_eq!(monday.to_date_string(), "31/12/2012");

    // Tuesday of that week is 1 Jan 2013, outside 2012.
    assert!(is_invalid_calendar(CalendarDate::parse(
        "mardi semaine 53 2012",
        &week_options()
    )));
}

#[test]
fn week_date_before_year_start_is_rejected() {
    // 1 Jan 2010 is a Friday, so week 0 has no Monday in 2010.
    assert!(is_invalid_calendar(CalendarDate::parse(
        "lundi semaine 0 2010",
        &week_options()
    )));
}

#[test]
fn week_date_year_is_checked_against_range() {
    let options = ParseOptions {
        years: YearRange::new(2012, 2012).unwrap(),
        format: DateFormat::WeekdayWeekYear,
    };
    assert!(is_invalid_calendar(CalendarDate::parse(
        "mardi semaine 1 2013",
        &options
    )));
}

#[test]
fn week_date_with_unknown_weekday_is_malformed() {
    assert!(is_malformed(CalendarDate::parse(
        "funday semaine 3 2012",
        &week_options()
    )));
}

#[test]
fn week_date_grammar() {
    let options = week_options();
    assert!(is_malformed(CalendarDate::parse("jeudi week 11 2012", &options)));
    assert!(is_malformed(CalendarDate::parse("jeudi semaine 111 2012", &options)));
    assert!(is_malformed(CalendarDate::parse("jeudi  semaine 11 2012", &options)));
    assert!(is_malformed(CalendarDate::parse("jeudi semaine 11 12", &options)));
}

// ── Clock times ───────────────────────────────────────────────────────

#[test]
fn parses_all_separators() {
    for text in ["14h25", "14H25", "14:25"] {
        let time = ClockTime::parse(text).unwrap();
        assert_eq!((time.hour(), time.minute()), (14, 25), "{}", text);
    }
}

#[test]
fn time_renders_with_padding() {
    assert_eq!(ClockTime::parse("8H5").unwrap().to_time_string(), "08h05");
    assert_eq!(ClockTime::parse("0h0").unwrap().to_string(), "00h00");
}

#[test]
fn rejects_out_of_range_time() {
    assert_eq!(
        ClockTime::parse("24h00"),
        Err(TemporalError::InvalidTimeValue {
            hour: 24,
            minute: 0
        })
    );
    assert_eq!(
        ClockTime::parse("14h60"),
        Err(TemporalError::InvalidTimeValue {
            hour: 14,
            minute: 60
        })
    );
    assert!(ClockTime::parse("23:59").is_ok());
}

#[test]
fn time_grammar() {
    assert!(is_malformed(ClockTime::parse("14.25")));
    assert!(is_malformed(ClockTime::parse("1425")));
    assert!(is_malformed(ClockTime::parse("14h")));
    assert!(is_malformed(ClockTime::parse("114h25")));
    assert!(is_malformed(ClockTime::parse("14h25m")));
}

// ── Temporal values ───────────────────────────────────────────────────

#[test]
fn temporal_value_from_texts() {
    let value = TemporalValue::parse("05/07/2012", "14h25", &ParseOptions::default()).unwrap();
    assert_eq!(value.to_date_string(), "05/07/2012");
    assert_eq!(value.to_time_string(), "14h25");
    assert_eq!(value.to_string(), "05/07/2012 14h25");
}

#[test]
fn temporal_value_from_week_date() {
    let value = TemporalValue::parse("jeudi semaine 11 2012", "9h00", &week_options()).unwrap();
    assert_eq!(value.to_string(), "15/03/2012 09h00");
}

#[test]
fn temporal_value_reports_first_failure() {
    let options = ParseOptions::default();
    assert!(is_malformed(TemporalValue::parse("5-7-2012", "25h99", &options)));
    assert!(is_invalid_calendar(TemporalValue::parse(
        "31/02/2012",
        "10h00",
        &options
    )));
    assert!(matches!(
        TemporalValue::parse("05/07/2012", "10h75", &options),
        Err(TemporalError::InvalidTimeValue { .. })
    ));
}

#[test]
fn from_fields_validates_every_field() {
    let years = YearRange::default();
    assert!(TemporalValue::from_fields(2012, 2, 29, 0, 0, &years).is_ok());
    assert!(TemporalValue::from_fields(2013, 2, 29, 0, 0, &years).is_err());
    assert!(TemporalValue::from_fields(2012, 1, 1, 24, 0, &years).is_err());
    assert!(TemporalValue::from_fields(1949, 1, 1, 0, 0, &years).is_err());
}

#[test]
fn ordering_is_lexicographic() {
    assert!(value(2012, 7, 5, 14, 25) < value(2012, 7, 5, 14, 26));
    assert!(value(2012, 7, 5, 23, 59) < value(2012, 7, 6, 0, 0));
    assert!(value(2012, 7, 31, 0, 0) < value(2012, 8, 1, 0, 0));
    assert!(value(2012, 12, 31, 23, 59) < value(2013, 1, 1, 0, 0));
    assert_eq!(value(2012, 7, 5, 14, 25), value(2012, 7, 5, 14, 25));
}

#[test]
fn equality_ignores_input_notation() {
    let options = ParseOptions::default();
    let a = TemporalValue::parse("5/7/2012", "8h5", &options).unwrap();
    let b = TemporalValue::parse("05/07/2012", "08:05", &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn minutes_between_values() {
    let start = value(2012, 7, 5, 9, 0);
    assert_eq!(start.minutes_until(&value(2012, 7, 5, 10, 30)), 90);
    assert_eq!(start.minutes_until(&value(2012, 7, 6, 9, 0)), 24 * 60);
    assert_eq!(value(2012, 7, 5, 10, 30).minutes_until(&start), -90);
}
