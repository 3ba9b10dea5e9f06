//! Appointments and their one-line text record.
//!
//! Record layout, one appointment per line:
//!
//! ```text
//! dd/mm/yyyy::hh(h|H|:)mm::hh(h|H|:)mm::label::category::description
//! 06/5/2012::8h00::20h00::Election::personnel::Absence
//! ```
//!
//! The date field is always in `dd/mm/yyyy` notation, whatever notation the
//! agenda uses for interactive input. The description is the rest of the line.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AgendaError, LabelProblem, Result};
use crate::interval::{HasInterval, Interval};
use crate::temporal::{CalendarDate, ClockTime, ParseOptions, TemporalValue};

/// Longest accepted label, in characters.
pub const LABEL_MAX_CHARS: usize = 8;

/// Descriptions must be strictly shorter than this, in characters.
pub const DESCRIPTION_LIMIT_CHARS: usize = 400;

const SEPARATOR: &str = "::";

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})::([0-9]{1,2}[hH:][0-9]{1,2})::([0-9]{1,2}[hH:][0-9]{1,2})::(.+?)::(.+?)::(.*)$",
    )
    .expect("valid regex")
});

/// One booked time range with its descriptive payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    label: String,
    description: String,
    category: String,
    start: TemporalValue,
    end: TemporalValue,
}

impl Appointment {
    /// Build an appointment, validating the text fields and the interval.
    ///
    /// # Errors
    /// - `InvalidLabel` for an empty label, one longer than 8 characters, or one
    ///   containing spaces or colons.
    /// - `InvalidDescription` for 400 characters or more, or a line break.
    /// - `InvalidCategory` for an empty category or one containing a colon or a line break.
    /// - `EmptyInterval` unless `start < end`.
    /// - `MultiDay` when `start` and `end` fall on different days.
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        start: TemporalValue,
        end: TemporalValue,
    ) -> Result<Self> {
        let label = label.into();
        let description = description.into();
        let category = category.into();

        validate_label(&label)?;
        validate_description(&description)?;
        validate_category(&category)?;
        validate_interval(&start, &end)?;

        Ok(Self {
            label,
            description,
            category,
            start,
            end,
        })
    }

    /// Build an appointment from user-entered date and time texts.
    pub fn parse(
        label: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        date: &str,
        start: &str,
        end: &str,
        options: &ParseOptions,
    ) -> Result<Self> {
        let date = CalendarDate::parse(date, options)?;
        let start = TemporalValue::new(date, ClockTime::parse(start)?);
        let end = TemporalValue::new(date, ClockTime::parse(end)?);
        Self::new(label, description, category, start, end)
    }

    /// A copy of this appointment moved to a new time range.
    pub fn rescheduled(&self, start: TemporalValue, end: TemporalValue) -> Result<Self> {
        validate_interval(&start, &end)?;
        Ok(Self {
            start,
            end,
            ..self.clone()
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn start(&self) -> TemporalValue {
        self.start
    }

    pub fn end(&self) -> TemporalValue {
        self.end
    }

    pub fn date(&self) -> CalendarDate {
        self.start.date()
    }

    /// Render the one-line record.
    pub fn to_record(&self) -> String {
        [
            self.start.to_date_string(),
            self.start.to_time_string(),
            self.end.to_time_string(),
            self.label.clone(),
            self.category.clone(),
            self.description.clone(),
        ]
        .join(SEPARATOR)
    }

    /// Parse a one-line record.
    ///
    /// # Errors
    /// `MalformedRecord` when the line does not have the record layout, the
    /// temporal errors for out-of-range dates and times, and the validation
    /// errors of [`Appointment::new`].
    pub fn from_record(line: &str, options: &ParseOptions) -> Result<Self> {
        let caps = RECORD
            .captures(line)
            .ok_or_else(|| AgendaError::MalformedRecord(line.to_string()))?;
        let date = CalendarDate::parse_day_month_year(&caps[1], &options.years)?;
        let start = TemporalValue::new(date, ClockTime::parse(&caps[2])?);
        let end = TemporalValue::new(date, ClockTime::parse(&caps[3])?);
        Self::new(&caps[4], &caps[6], &caps[5], start, end)
    }
}

impl HasInterval for Appointment {
    fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {} [{}]",
            self.start.to_date_string(),
            self.start.to_time_string(),
            self.end.to_time_string(),
            self.label,
            self.category
        )
    }
}

/// Labels are 1 to 8 characters, without spaces or colons.
pub fn validate_label(label: &str) -> Result<()> {
    let problem = if label.is_empty() {
        Some(LabelProblem::Empty)
    } else if label.chars().count() > LABEL_MAX_CHARS {
        Some(LabelProblem::TooLong)
    } else if label.chars().any(char::is_whitespace) {
        Some(LabelProblem::ContainsSpace)
    } else if label.contains(':') {
        Some(LabelProblem::ContainsColon)
    } else {
        None
    };

    match problem {
        Some(problem) => Err(AgendaError::InvalidLabel {
            label: label.to_string(),
            problem,
        }),
        None => Ok(()),
    }
}

/// Descriptions are shorter than 400 characters and fit on one line.
pub fn validate_description(description: &str) -> Result<()> {
    let length = description.chars().count();
    if length >= DESCRIPTION_LIMIT_CHARS {
        return Err(AgendaError::InvalidDescription(format!(
            "{length} characters, the limit is {}",
            DESCRIPTION_LIMIT_CHARS - 1
        )));
    }
    if description.contains(['\n', '\r']) {
        return Err(AgendaError::InvalidDescription(
            "line breaks are not allowed".to_string(),
        ));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<()> {
    if category.is_empty() || category.contains([':', '\n', '\r']) {
        return Err(AgendaError::InvalidCategory(category.to_string()));
    }
    Ok(())
}

fn validate_interval(start: &TemporalValue, end: &TemporalValue) -> Result<()> {
    if start >= end {
        return Err(AgendaError::EmptyInterval {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    if start.date() != end.date() {
        return Err(AgendaError::MultiDay {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
