//! # agenda-core
//!
//! Calendar arithmetic, appointment intervals and double-booking detection
//! for a personal agenda.
//!
//! The hard part of an appointment book is time: turning what people type
//! (`05/07/2012`, `jeudi semaine 11 2012`, `14h25`) into validated instants,
//! knowing the calendar facts behind them, and deciding exactly how two
//! booked intervals relate. Everything else (the sorted list, the record
//! file, the configuration) is built on top of those pieces.
//!
//! ## Quick start
//!
//! ```rust
//! use agenda_core::{classify, IntervalOutcome, Interval, ParseOptions, TemporalValue};
//!
//! let options = ParseOptions::default();
//! let a = Interval::new(
//!     TemporalValue::parse("10/01/2012", "09h00", &options).unwrap(),
//!     TemporalValue::parse("10/01/2012", "11h00", &options).unwrap(),
//! );
//! let b = Interval::new(
//!     TemporalValue::parse("10/01/2012", "10h00", &options).unwrap(),
//!     TemporalValue::parse("10/01/2012", "10h30", &options).unwrap(),
//! );
//! assert_eq!(classify(&a, &b), IntervalOutcome::Contains);
//! ```
//!
//! ## Modules
//!
//! - [`calendar`]: leap years, month lengths, day of year, weekdays, week numbers
//! - [`temporal`]: `CalendarDate`, `ClockTime`, `TemporalValue` and their parsers
//! - [`interval`]: 7-way interval classification and conflict detection
//! - [`freebusy`]: free slots between booked appointments
//! - [`appointment`]: validated appointments and their one-line record
//! - [`agenda`]: the sorted, bounded appointment list
//! - [`storage`]: line-addressed text file
//! - [`repository`]: the appointment list bound to its record file
//! - [`config`]: TOML configuration
//! - [`error`]: Error types

pub mod agenda;
pub mod appointment;
pub mod calendar;
pub mod config;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod repository;
pub mod storage;
pub mod temporal;

pub use agenda::{Agenda, ConflictPolicy};
pub use appointment::Appointment;
pub use config::{AgendaConfig, SaveMode};
pub use error::{AgendaError, TemporalError};
pub use freebusy::{find_free_slots, FreeSlot};
pub use interval::{classify, find_conflicts, overlaps, HasInterval, Interval, IntervalOutcome};
pub use repository::{AgendaRepository, LoadReport};
pub use storage::LineFile;
pub use temporal::{CalendarDate, ClockTime, DateFormat, ParseOptions, TemporalValue, YearRange};
