//! The appointment list bound to its record file.
//!
//! Line `i` of the record file always holds appointment `i` of the list once
//! the repository is open. In [`SaveMode::Immediate`] each change is written
//! through with the matching line edit. In [`SaveMode::OnExit`] changes are
//! only marked pending and [`AgendaRepository::flush`] rewrites the file.
//! A failed write-through also leaves the repository pending, so the next
//! flush rewrites the file from the list.

use std::path::Path;

use tracing::{debug, warn};

use crate::agenda::{Agenda, ConflictPolicy};
use crate::appointment::Appointment;
use crate::config::{AgendaConfig, SaveMode};
use crate::error::Result;
use crate::storage::LineFile;
use crate::temporal::{ParseOptions, TemporalValue};

/// Outcome of reading the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Records turned into appointments.
    pub loaded: usize,
    /// Lines that could not be loaded (malformed, invalid, duplicate or over capacity).
    pub skipped: usize,
}

/// An [`Agenda`] persisted to a [`LineFile`].
#[derive(Debug)]
pub struct AgendaRepository {
    agenda: Agenda,
    file: LineFile,
    mode: SaveMode,
    pending: bool,
}

impl AgendaRepository {
    /// Open the record file named by `config`.
    pub fn open(config: &AgendaConfig) -> Result<(Self, LoadReport)> {
        Self::open_at(
            &config.data_file,
            &config.parse_options(),
            config.max_appointments,
            config.save_mode,
        )
    }

    /// Open the record file at `path` and load every readable record.
    ///
    /// Unreadable lines are skipped with a warning. When the file content
    /// differs from what the loaded list would write (skipped lines, unsorted
    /// records, non-canonical notation) the repository starts out pending; in
    /// immediate mode the file is rewritten right away so line indexes match
    /// list indexes.
    pub fn open_at(
        path: impl AsRef<Path>,
        options: &ParseOptions,
        capacity: usize,
        mode: SaveMode,
    ) -> Result<(Self, LoadReport)> {
        let file = LineFile::open(path)?;
        let lines = file.read_lines()?;
        let mut agenda = Agenda::new(capacity);
        let mut report = LoadReport::default();

        for (number, line) in lines.iter().enumerate() {
            let loaded = Appointment::from_record(line, options)
                .and_then(|appointment| agenda.add(appointment, ConflictPolicy::Allow));
            match loaded {
                Ok(_) => report.loaded += 1,
                Err(error) => {
                    warn!(line = number + 1, %error, "skipping appointment record");
                    report.skipped += 1;
                }
            }
        }

        let mut repository = Self {
            agenda,
            file,
            mode,
            pending: false,
        };
        repository.pending = repository.records() != lines;
        if repository.pending && mode == SaveMode::Immediate {
            repository.flush()?;
        }

        debug!(
            path = %repository.file.path().display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "opened agenda"
        );
        Ok((repository, report))
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    /// Whether the file lags behind the list.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// See [`Agenda::add`].
    pub fn add(&mut self, appointment: Appointment, policy: ConflictPolicy) -> Result<usize> {
        let record = appointment.to_record();
        let index = self.agenda.add(appointment, policy)?;
        self.write_through(|file| file.insert_line(index, &record))?;
        Ok(index)
    }

    /// See [`Agenda::remove`].
    pub fn remove(&mut self, index: usize) -> Result<Appointment> {
        let removed = self.agenda.remove(index)?;
        self.write_through(|file| file.delete_line(index).map(drop))?;
        Ok(removed)
    }

    /// See [`Agenda::reschedule`].
    pub fn reschedule(
        &mut self,
        index: usize,
        start: TemporalValue,
        end: TemporalValue,
        policy: ConflictPolicy,
    ) -> Result<usize> {
        let new_index = self.agenda.reschedule(index, start, end, policy)?;
        let records = self.records();
        self.write_through(|file| file.write_lines(&records))?;
        Ok(new_index)
    }

    /// Rewrite the whole file if anything is pending. Returns whether it wrote.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.pending {
            return Ok(false);
        }
        self.file.write_lines(&self.records())?;
        self.pending = false;
        Ok(true)
    }

    fn records(&self) -> Vec<String> {
        self.agenda.iter().map(Appointment::to_record).collect()
    }

    fn write_through(&mut self, edit: impl FnOnce(&LineFile) -> Result<()>) -> Result<()> {
        match self.mode {
            SaveMode::Immediate => edit(&self.file).inspect_err(|error| {
                warn!(path = %self.file.path().display(), %error, "write-through failed");
                self.pending = true;
            }),
            SaveMode::OnExit => {
                self.pending = true;
                Ok(())
            }
        }
    }
}
