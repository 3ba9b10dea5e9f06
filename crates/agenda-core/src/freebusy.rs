//! Compute free time slots around booked appointments.
//!
//! Sorts busy intervals by start time, merges overlapping or touching busy
//! periods, then returns the gaps between them within a given window.

use crate::interval::{HasInterval, Interval};
use crate::temporal::TemporalValue;

/// A free time slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSlot {
    pub start: TemporalValue,
    pub end: TemporalValue,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn between(start: TemporalValue, end: TemporalValue) -> Self {
        Self {
            start,
            end,
            duration_minutes: start.minutes_until(&end),
        }
    }
}

/// Merge overlapping or adjacent busy periods, clipped to `window`.
///
/// Returns a sorted, non-overlapping list of intervals.
pub fn merge_busy_periods<T: HasInterval>(items: &[T], window: &Interval) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = items
        .iter()
        .map(HasInterval::interval)
        .filter(|i| i.start < window.end && i.end > window.start)
        .map(|i| Interval::new(i.start.max(window.start), i.end.min(window.end)))
        .collect();

    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Free slots inside `window`, sorted by start time.
pub fn find_free_slots<T: HasInterval>(items: &[T], window: &Interval) -> Vec<FreeSlot> {
    if window.start >= window.end {
        return Vec::new();
    }

    let mut free_slots = Vec::new();
    let mut cursor = window.start;

    for busy in merge_busy_periods(items, window) {
        if cursor < busy.start {
            free_slots.push(FreeSlot::between(cursor, busy.start));
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window.end {
        free_slots.push(FreeSlot::between(cursor, window.end));
    }

    free_slots
}

/// Free slots of at least `min_duration_minutes`.
pub fn find_free_slots_of_at_least<T: HasInterval>(
    items: &[T],
    window: &Interval,
    min_duration_minutes: i64,
) -> Vec<FreeSlot> {
    find_free_slots(items, window)
        .into_iter()
        .filter(|slot| slot.duration_minutes >= min_duration_minutes)
        .collect()
}
