//! The in-memory appointment list.
//!
//! Appointments are kept sorted by `(start, end)`. Every insertion is checked
//! against the stored intervals first: an identical interval is always
//! refused, an overlapping one is refused or accepted depending on the
//! [`ConflictPolicy`].

use tracing::debug;

use crate::appointment::Appointment;
use crate::error::{AgendaError, Result};
use crate::freebusy::{self, FreeSlot};
use crate::interval::{self, Conflict, HasInterval, Interval};
use crate::temporal::{CalendarDate, TemporalValue};

/// Capacity used when the configuration does not say otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// What to do when a new interval overlaps stored appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Refuse with [`AgendaError::Conflict`].
    #[default]
    Reject,
    /// Store it anyway.
    Allow,
}

/// A bounded, sorted list of appointments.
#[derive(Debug, Clone)]
pub struct Agenda {
    appointments: Vec<Appointment>,
    capacity: usize,
}

impl Default for Agenda {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Agenda {
    pub fn new(capacity: usize) -> Self {
        Self {
            appointments: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Appointment> {
        self.appointments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Appointment> {
        self.appointments.iter()
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Stored appointments overlapping `candidate`, in list order.
    pub fn conflicts(&self, candidate: &Interval) -> Vec<Conflict<'_, Appointment>> {
        interval::describe_conflicts(candidate, &self.appointments)
    }

    /// Appointments taking place on `date`.
    pub fn on_date(&self, date: CalendarDate) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(move |a| a.date() == date)
    }

    /// Free slots inside `window`.
    pub fn free_slots(&self, window: &Interval) -> Vec<FreeSlot> {
        freebusy::find_free_slots(&self.appointments, window)
    }

    /// Insert `appointment` at its sorted position and return that position.
    ///
    /// # Errors
    /// `Full` when the capacity is reached, `Duplicate` when an appointment with
    /// the same interval exists, `Conflict` when it overlaps stored
    /// appointments and `policy` is [`ConflictPolicy::Reject`].
    pub fn add(&mut self, appointment: Appointment, policy: ConflictPolicy) -> Result<usize> {
        if self.appointments.len() >= self.capacity {
            return Err(AgendaError::Full(self.capacity));
        }
        self.check_slot(&appointment.interval(), policy, None)?;

        let index = self.insertion_index(&appointment);
        debug!(index, appointment = %appointment, "adding appointment");
        self.appointments.insert(index, appointment);
        Ok(index)
    }

    /// Remove and return the appointment at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Appointment> {
        if index >= self.appointments.len() {
            return Err(AgendaError::IndexOutOfRange {
                index,
                len: self.appointments.len(),
            });
        }
        let removed = self.appointments.remove(index);
        debug!(index, appointment = %removed, "removed appointment");
        Ok(removed)
    }

    /// Move the appointment at `index` to `[start, end)` and return its new
    /// position. The appointment itself is ignored by the conflict checks.
    pub fn reschedule(
        &mut self,
        index: usize,
        start: TemporalValue,
        end: TemporalValue,
        policy: ConflictPolicy,
    ) -> Result<usize> {
        let current = self.get(index).ok_or(AgendaError::IndexOutOfRange {
            index,
            len: self.appointments.len(),
        })?;
        let moved = current.rescheduled(start, end)?;
        self.check_slot(&moved.interval(), policy, Some(index))?;

        self.appointments.remove(index);
        let new_index = self.insertion_index(&moved);
        debug!(from = index, to = new_index, appointment = %moved, "rescheduled appointment");
        self.appointments.insert(new_index, moved);
        Ok(new_index)
    }

    fn check_slot(
        &self,
        candidate: &Interval,
        policy: ConflictPolicy,
        ignore: Option<usize>,
    ) -> Result<()> {
        let others: Vec<&Appointment> = self
            .appointments
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ignore)
            .map(|(_, a)| a)
            .collect();

        if others.iter().any(|a| a.interval() == *candidate) {
            return Err(AgendaError::Duplicate(format!(
                "{} {}-{}",
                candidate.start.to_date_string(),
                candidate.start.to_time_string(),
                candidate.end.to_time_string()
            )));
        }

        if policy == ConflictPolicy::Reject {
            let labels: Vec<String> = others
                .iter()
                .filter(|a| interval::overlaps(candidate, &a.interval()))
                .map(|a| a.label().to_string())
                .collect();
            if !labels.is_empty() {
                return Err(AgendaError::Conflict { labels });
            }
        }
        Ok(())
    }

    fn insertion_index(&self, appointment: &Appointment) -> usize {
        let key = (appointment.start(), appointment.end());
        self.appointments
            .partition_point(|a| (a.start(), a.end()) <= key)
    }
}

impl<'a> IntoIterator for &'a Agenda {
    type Item = &'a Appointment;
    type IntoIter = std::slice::Iter<'a, Appointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.appointments.iter()
    }
}
