//! Gregorian calendar arithmetic.
//!
//! Pure, total functions over plain integers and validated
//! [`CalendarDate`]s. Weekdays are numbered `0..=6` starting from Sunday.
//!
//! Week numbers follow a Monday-based, ISO-like rule computed from the weekday
//! of January 1st. Early January days that close the previous year's last week
//! yield week `0`, and the last days of December may yield week `53` even when
//! they belong to week 1 of the following year.

use crate::temporal::CalendarDate;

/// Number of days per month in a common year, January first.
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// English weekday names, indexed by weekday number (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// French weekday names, used by the `<weekday> semaine <n> <year>` notation.
pub const FRENCH_DAY_NAMES: [&str; 7] = [
    "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
];

/// Returned by [`day_name`] for numbers outside `0..=6`.
pub const INVALID_DAY_NAME: &str = "Invalid";

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of `month` (1-12) in `year`. Months outside `1..=12` have no days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => MONTH_LENGTHS[(month - 1) as usize],
        _ => 0,
    }
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// 1-based ordinal of `date` within its year.
pub fn day_of_year(date: &CalendarDate) -> u32 {
    ordinal(date.year(), date.month(), date.day())
}

fn ordinal(year: i32, month: u32, day: u32) -> u32 {
    (1..month).map(|m| days_in_month(year, m)).sum::<u32>() + day
}

/// Month and day for the `ordinal`-th day of `year`, if the year has that many days.
pub fn month_day_from_ordinal(year: i32, ordinal: u32) -> Option<(u32, u32)> {
    if ordinal == 0 || ordinal > days_in_year(year) {
        return None;
    }
    let mut remaining = ordinal;
    for month in 1..=12 {
        let length = days_in_month(year, month);
        if remaining <= length {
            return Some((month, remaining));
        }
        remaining -= length;
    }
    None
}

/// Weekday of January 1st of `year`, `0` being Sunday.
///
/// Gregorian congruence on the century (`year / 100`) and the year within the
/// century (`year % 100`). In a leap year the `y / 4` term already counts this
/// year's February 29th, which January 1st precedes, hence the `+ 6` (that is,
/// `- 1` modulo 7).
pub fn first_weekday_of_year(year: i32) -> u32 {
    let century = year.div_euclid(100);
    let within = year.rem_euclid(100);
    let leap_shift = if is_leap_year(year) { 6 } else { 0 };
    (5 * century + century.div_euclid(4) + within / 4 + within + leap_shift).rem_euclid(7) as u32
}

/// Weekday of `date`, `0` being Sunday.
pub fn weekday(date: &CalendarDate) -> u32 {
    (first_weekday_of_year(date.year()) + day_of_year(date) - 1) % 7
}

/// Week number of `date` within its own year.
///
/// `(first + ordinal + 5) / 7 - first / 5` with integer division, where
/// `first` is [`first_weekday_of_year`]. Boundary weeks are not folded into the
/// neighbouring year, see the module documentation.
pub fn week_number(date: &CalendarDate) -> u32 {
    let first = first_weekday_of_year(date.year());
    (first + day_of_year(date) + 5) / 7 - first / 5
}

/// Ordinal of the day with weekday `weekday` in week `week` of `year`, as
/// numbered by [`week_number`]. The result may fall outside the year.
pub(crate) fn ordinal_of_week_day(year: i32, week: u32, weekday: u32) -> i64 {
    let first = i64::from(first_weekday_of_year(year));
    // Weeks start on Monday: shift Sunday (0) to the end of the week.
    let offset_from_monday = (i64::from(weekday) + 6) % 7;
    let monday = 7 * (i64::from(week) + first / 5) - 6;
    monday + offset_from_monday - first + 1
}

/// English name of weekday `number`, or [`INVALID_DAY_NAME`] when out of range.
pub fn day_name(number: i32) -> &'static str {
    usize::try_from(number)
        .ok()
        .and_then(|n| DAY_NAMES.get(n))
        .copied()
        .unwrap_or(INVALID_DAY_NAME)
}

/// Weekday number for an English or French day name, ignoring case.
pub fn weekday_from_name(name: &str) -> Option<u32> {
    DAY_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
        .or_else(|| {
            FRENCH_DAY_NAMES
                .iter()
                .position(|candidate| candidate.eq_ignore_ascii_case(name))
        })
        .map(|n| n as u32)
}
