//! Dates, clock times and the combined [`TemporalValue`].
//!
//! All three types are immutable and only built through validating
//! constructors. Parsing is driven by an explicit [`ParseOptions`] value
//! (managed year range and date notation) rather than ambient state.
//!
//! Accepted notations:
//!
//! - dates, [`DateFormat::DayMonthYear`]: `dd/mm/yyyy` (one or two digit day and month)
//! - dates, [`DateFormat::WeekdayWeekYear`]: `<weekday> semaine <week> <yyyy>`
//! - times: `hh(h|H|:)mm`, e.g. `14h25`, `8H05`, `09:30`

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::{TemporalError, TemporalResult};

/// Earliest year the agenda can be configured to manage.
pub const MANAGED_YEAR_MIN: i32 = 1950;

/// Latest year the agenda can be configured to manage.
pub const MANAGED_YEAR_MAX: i32 = 2050;

static DAY_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid regex"));

static WEEKDAY_WEEK_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]{1,9}) semaine ([0-9]{1,2}) ([0-9]{4})$").expect("valid regex")
});

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})[hH:]([0-9]{1,2})$").expect("valid regex"));

/// Inclusive window of years a [`CalendarDate`] may fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Returns `None` when `min > max`.
    pub fn new(min: i32, max: i32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: MANAGED_YEAR_MIN,
            max: MANAGED_YEAR_MAX,
        }
    }
}

/// Textual date notation accepted by the parsers.
///
/// Stored in configuration as the integers `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DateFormat {
    /// `dd/mm/yyyy`
    #[default]
    DayMonthYear,
    /// `<weekday> semaine <week> <yyyy>`
    WeekdayWeekYear,
}

impl TryFrom<u8> for DateFormat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DateFormat::DayMonthYear),
            2 => Ok(DateFormat::WeekdayWeekYear),
            other => Err(format!("date format must be 1 or 2, got {other}")),
        }
    }
}

impl From<DateFormat> for u8 {
    fn from(format: DateFormat) -> Self {
        match format {
            DateFormat::DayMonthYear => 1,
            DateFormat::WeekdayWeekYear => 2,
        }
    }
}

/// Everything the parsers need to know about the agenda's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub years: YearRange,
    pub format: DateFormat,
}

/// A validated day of the Gregorian calendar.
///
/// Field order gives the derived ordering: year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date, checking the year against `years` and the day against the
    /// month length.
    pub fn new(year: i32, month: u32, day: u32, years: &YearRange) -> TemporalResult<Self> {
        if !years.contains(year) {
            return Err(TemporalError::InvalidCalendarValue(format!(
                "year {year} is outside {}..={}",
                years.min(),
                years.max()
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidCalendarValue(format!(
                "month {month} is outside 1..=12"
            )));
        }
        let last_day = calendar::days_in_month(year, month);
        if !(1..=last_day).contains(&day) {
            return Err(TemporalError::InvalidCalendarValue(format!(
                "day {day} is outside 1..={last_day} for {month:02}/{year}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Parse `text` using the notation selected in `options`.
    pub fn parse(text: &str, options: &ParseOptions) -> TemporalResult<Self> {
        match options.format {
            DateFormat::DayMonthYear => Self::parse_day_month_year(text, &options.years),
            DateFormat::WeekdayWeekYear => Self::parse_week_date(text, &options.years),
        }
    }

    /// Parse `dd/mm/yyyy`.
    pub fn parse_day_month_year(text: &str, years: &YearRange) -> TemporalResult<Self> {
        let caps = DAY_MONTH_YEAR
            .captures(text)
            .ok_or_else(|| malformed("date", text, "dd/mm/yyyy"))?;
        let day = number(&caps, 1, text)?;
        let month = number(&caps, 2, text)?;
        let year = number(&caps, 3, text)?;
        Self::new(year, month, day, years)
    }

    /// Parse `<weekday> semaine <week> <yyyy>`.
    ///
    /// The weekday/week pair is resolved with the same numbering as
    /// [`calendar::week_number`], so the resulting date always reports `week`
    /// back. Pairs that land outside the given year are rejected.
    pub fn parse_week_date(text: &str, years: &YearRange) -> TemporalResult<Self> {
        let caps = WEEKDAY_WEEK_YEAR
            .captures(text)
            .ok_or_else(|| malformed("date", text, "<weekday> semaine <week> <yyyy>"))?;
        let weekday = calendar::weekday_from_name(&caps[1]).ok_or_else(|| {
            TemporalError::MalformedInput(format!("unknown weekday name '{}'", &caps[1]))
        })?;
        let week: u32 = number(&caps, 2, text)?;
        let year: i32 = number(&caps, 3, text)?;

        let ordinal = calendar::ordinal_of_week_day(year, week, weekday);
        let (month, day) = u32::try_from(ordinal)
            .ok()
            .and_then(|ordinal| calendar::month_day_from_ordinal(year, ordinal))
            .ok_or_else(|| {
                TemporalError::InvalidCalendarValue(format!(
                    "{} of week {week} does not fall within {year}",
                    calendar::day_name(weekday as i32)
                ))
            })?;
        Self::new(year, month, day, years)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_of_year(&self) -> u32 {
        calendar::day_of_year(self)
    }

    /// Weekday number, `0` being Sunday.
    pub fn weekday(&self) -> u32 {
        calendar::weekday(self)
    }

    pub fn week_number(&self) -> u32 {
        calendar::week_number(self)
    }

    /// `dd/mm/yyyy`
    pub fn to_date_string(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_date_string())
    }
}

/// A validated minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> TemporalResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(TemporalError::InvalidTimeValue { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Parse `hh(h|H|:)mm`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        let caps = CLOCK
            .captures(text)
            .ok_or_else(|| malformed("time", text, "hh(h|H|:)mm"))?;
        Self::new(number(&caps, 1, text)?, number(&caps, 2, text)?)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// `HHhmm`
    pub fn to_time_string(&self) -> String {
        format!("{:02}h{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_time_string())
    }
}

/// One instant at minute resolution: a calendar date plus a clock time.
///
/// Ordering and equality are lexicographic over
/// `(year, month, day, hour, minute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemporalValue {
    date: CalendarDate,
    time: ClockTime,
}

impl TemporalValue {
    pub fn new(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    /// Build from numeric fields, validating each of them.
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        years: &YearRange,
    ) -> TemporalResult<Self> {
        Ok(Self {
            date: CalendarDate::new(year, month, day, years)?,
            time: ClockTime::new(hour, minute)?,
        })
    }

    /// Parse a user-entered date and time pair.
    ///
    /// Both texts are matched against their grammar before any numeric
    /// validation takes place.
    pub fn parse(date: &str, time: &str, options: &ParseOptions) -> TemporalResult<Self> {
        let date = CalendarDate::parse(date, options)?;
        let time = ClockTime::parse(time)?;
        Ok(Self { date, time })
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// `dd/mm/yyyy`
    pub fn to_date_string(&self) -> String {
        self.date.to_date_string()
    }

    /// `HHhmm`
    pub fn to_time_string(&self) -> String {
        self.time.to_time_string()
    }

    /// The same instant as a chrono naive datetime.
    pub fn to_naive(&self) -> NaiveDateTime {
        // Fields are validated at construction, so chrono accepts them.
        NaiveDate::from_ymd_opt(self.date.year, self.date.month, self.date.day)
            .and_then(|d| d.and_hms_opt(self.time.hour, self.time.minute, 0))
            .unwrap_or_default()
    }

    /// Signed number of minutes from `self` to `later`.
    pub fn minutes_until(&self, later: &TemporalValue) -> i64 {
        (later.to_naive() - self.to_naive()).num_minutes()
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

fn malformed(what: &str, text: &str, expected: &str) -> TemporalError {
    TemporalError::MalformedInput(format!("{what} '{text}' does not match {expected}"))
}

fn number<T: FromStr>(caps: &Captures<'_>, group: usize, text: &str) -> TemporalResult<T> {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| TemporalError::MalformedInput(format!("'{text}' has an unreadable number")))
}
