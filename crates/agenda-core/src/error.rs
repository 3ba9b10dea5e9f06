//! Error types for agenda-core operations.
//!
//! [`TemporalError`] covers everything that can go wrong while turning text or
//! numbers into a [`TemporalValue`](crate::temporal::TemporalValue).
//! [`AgendaError`] is the application-level error and wraps the temporal one.

use thiserror::Error;

/// Failures produced while building dates, times and temporal values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalError {
    /// The text does not match the expected date or time grammar.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Year, month or day out of range, or the day exceeds the month length.
    #[error("Invalid calendar value: {0}")]
    InvalidCalendarValue(String),

    /// Hour or minute out of range.
    #[error("Invalid time value {hour:02}:{minute:02}")]
    InvalidTimeValue { hour: u32, minute: u32 },
}

/// Why a label was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelProblem {
    Empty,
    TooLong,
    ContainsSpace,
    ContainsColon,
}

impl std::fmt::Display for LabelProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            LabelProblem::Empty => "label is empty",
            LabelProblem::TooLong => "label is longer than 8 characters",
            LabelProblem::ContainsSpace => "label contains spaces",
            LabelProblem::ContainsColon => "label contains ':'",
        };
        f.write_str(text)
    }
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors raised by the appointment list, its storage and its configuration.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid label '{label}': {problem}")]
    InvalidLabel { label: String, problem: LabelProblem },

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Invalid category '{0}'")]
    InvalidCategory(String),

    #[error("Appointment must end after it starts ({start} -> {end})")]
    EmptyInterval { start: String, end: String },

    #[error("Appointment must start and end on the same day ({start} -> {end})")]
    MultiDay { start: String, end: String },

    #[error("Appointment conflicts with: {}", labels.join(", "))]
    Conflict { labels: Vec<String> },

    #[error("Agenda is full ({0} appointments)")]
    Full(usize),

    #[error("An appointment already occupies {0}")]
    Duplicate(String),

    #[error("No appointment at index {index} (agenda holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

/// Result alias for temporal parsing and construction.
pub type TemporalResult<T> = std::result::Result<T, TemporalError>;

/// Convenience alias used throughout agenda-core.
pub type Result<T> = std::result::Result<T, AgendaError>;
