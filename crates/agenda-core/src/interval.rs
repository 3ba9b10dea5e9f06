//! How two appointment intervals relate to each other.
//!
//! Intervals are half-open: `[start, end)`. Two intervals that only share a
//! boundary instant (one ends exactly when the other starts) do NOT conflict.
//! Nothing here validates `start < end`; callers build intervals from
//! appointments that already enforce it.

use serde::Serialize;

use crate::temporal::TemporalValue;

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: TemporalValue,
    pub end: TemporalValue,
}

impl Interval {
    pub fn new(start: TemporalValue, end: TemporalValue) -> Self {
        Self { start, end }
    }

    /// Length in minutes (negative for an inverted interval).
    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(&self.end)
    }
}

/// Anything that occupies a time interval.
pub trait HasInterval {
    fn interval(&self) -> Interval;
}

impl HasInterval for Interval {
    fn interval(&self) -> Interval {
        *self
    }
}

/// Relationship of interval A to interval B, as computed by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalOutcome {
    /// A ends at or before B starts.
    StrictlyBefore,
    /// A starts first and ends inside B.
    BeforeOverlapping,
    /// A lies within B (B contains A), possibly sharing one endpoint.
    ContainedIn,
    /// Same start and same end.
    Equal,
    /// A covers B, possibly sharing one endpoint.
    Contains,
    /// A starts inside B and ends after it.
    AfterOverlapping,
    /// A starts at or after B ends.
    StrictlyAfter,
}

impl IntervalOutcome {
    /// The outcome seen from the other interval: `classify(b, a)` given
    /// `classify(a, b)`.
    pub fn converse(self) -> Self {
        match self {
            IntervalOutcome::StrictlyBefore => IntervalOutcome::StrictlyAfter,
            IntervalOutcome::BeforeOverlapping => IntervalOutcome::AfterOverlapping,
            IntervalOutcome::ContainedIn => IntervalOutcome::Contains,
            IntervalOutcome::Equal => IntervalOutcome::Equal,
            IntervalOutcome::Contains => IntervalOutcome::ContainedIn,
            IntervalOutcome::AfterOverlapping => IntervalOutcome::BeforeOverlapping,
            IntervalOutcome::StrictlyAfter => IntervalOutcome::StrictlyBefore,
        }
    }

    /// Whether the two intervals share any instant.
    pub fn is_conflict(self) -> bool {
        !matches!(
            self,
            IntervalOutcome::StrictlyBefore | IntervalOutcome::StrictlyAfter
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntervalOutcome::StrictlyBefore => "strictly_before",
            IntervalOutcome::BeforeOverlapping => "before_overlapping",
            IntervalOutcome::ContainedIn => "contained_in",
            IntervalOutcome::Equal => "equal",
            IntervalOutcome::Contains => "contains",
            IntervalOutcome::AfterOverlapping => "after_overlapping",
            IntervalOutcome::StrictlyAfter => "strictly_after",
        }
    }
}

impl std::fmt::Display for IntervalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify A's relationship to B.
pub fn classify(a: &Interval, b: &Interval) -> IntervalOutcome {
    if a.end <= b.start {
        IntervalOutcome::StrictlyBefore
    } else if a.start >= b.end {
        IntervalOutcome::StrictlyAfter
    } else if a.start <= b.start {
        if a.start == b.start {
            match a.end.cmp(&b.end) {
                std::cmp::Ordering::Equal => IntervalOutcome::Equal,
                std::cmp::Ordering::Greater => IntervalOutcome::Contains,
                std::cmp::Ordering::Less => IntervalOutcome::ContainedIn,
            }
        } else if a.end >= b.end {
            IntervalOutcome::Contains
        } else {
            IntervalOutcome::BeforeOverlapping
        }
    } else if a.end > b.end {
        IntervalOutcome::AfterOverlapping
    } else {
        // B started earlier and ends no sooner than A: A sits inside B.
        IntervalOutcome::ContainedIn
    }
}

/// Two intervals overlap iff `a.end > b.start && a.start < b.end`.
///
/// Agrees with [`classify`]: true exactly when the outcome is neither
/// `StrictlyBefore` nor `StrictlyAfter`.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.end > b.start && a.start < b.end
}

/// Every element of `existing` whose interval overlaps `candidate`, in slice
/// order.
pub fn find_conflicts<'a, T: HasInterval>(candidate: &Interval, existing: &'a [T]) -> Vec<&'a T> {
    existing
        .iter()
        .filter(|item| overlaps(candidate, &item.interval()))
        .collect()
}

/// A stored item that overlaps a candidate interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a, T> {
    /// The conflicting item.
    pub item: &'a T,
    /// How the candidate relates to the item.
    pub outcome: IntervalOutcome,
    /// Length of the shared time range.
    pub overlap_minutes: i64,
}

/// Like [`find_conflicts`], with the classification and the overlap length of
/// each hit.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn describe_conflicts<'a, T: HasInterval>(
    candidate: &Interval,
    existing: &'a [T],
) -> Vec<Conflict<'a, T>> {
    find_conflicts(candidate, existing)
        .into_iter()
        .map(|item| {
            let other = item.interval();
            let overlap_start = candidate.start.max(other.start);
            let overlap_end = candidate.end.min(other.end);
            Conflict {
                item,
                outcome: classify(candidate, &other),
                overlap_minutes: overlap_start.minutes_until(&overlap_end),
            }
        })
        .collect()
}
