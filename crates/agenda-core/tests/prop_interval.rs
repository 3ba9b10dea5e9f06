//! Property-based tests for interval classification, conflict detection and
//! free slot computation.

use agenda_core::freebusy::merge_busy_periods;
use agenda_core::{
    classify, find_conflicts, find_free_slots, overlaps, Interval, IntervalOutcome,
    TemporalValue, YearRange,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Minute of the day as a value on 1 to 3 Jan 2012.
fn value(day: u32, minute_of_day: u32) -> TemporalValue {
    TemporalValue::from_fields(
        2012,
        1,
        day,
        minute_of_day / 60,
        minute_of_day % 60,
        &YearRange::default(),
    )
    .unwrap()
}

/// A non-empty interval inside a single day.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (1u32..=3, 0u32..1439).prop_flat_map(|(day, start)| {
        (start + 1..=1439).prop_map(move |end| Interval::new(value(day, start), value(day, end)))
    })
}

/// Intervals drawn from a coarse grid so that shared endpoints are common.
fn arb_grid_interval() -> impl Strategy<Value = Interval> {
    (0u32..8).prop_flat_map(|start| {
        (start + 1..=8).prop_map(move |end| Interval::new(value(1, start * 30), value(1, end * 30)))
    })
}

fn arb_any_interval() -> impl Strategy<Value = Interval> {
    prop_oneof![arb_interval(), arb_grid_interval()]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Swapping the operands gives the converse outcome
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn classify_converse_law(a in arb_any_interval(), b in arb_any_interval()) {
        prop_assert_eq!(classify(&b, &a), classify(&a, &b).converse());
    }

    #[test]
    fn strictly_before_iff_other_strictly_after(a in arb_any_interval(), b in arb_any_interval()) {
        prop_assert_eq!(
            classify(&a, &b) == IntervalOutcome::StrictlyBefore,
            classify(&b, &a) == IntervalOutcome::StrictlyAfter
        );
    }

    #[test]
    fn interval_equals_itself(a in arb_any_interval()) {
        prop_assert_eq!(classify(&a, &a), IntervalOutcome::Equal);
    }
}

// ---------------------------------------------------------------------------
// Property 2: The boolean overlap test agrees with the classification
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlaps_iff_conflicting_outcome(a in arb_any_interval(), b in arb_any_interval()) {
        prop_assert_eq!(overlaps(&a, &b), classify(&a, &b).is_conflict());
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn find_conflicts_keeps_order_and_only_overlaps(
        candidate in arb_any_interval(),
        existing in prop::collection::vec(arb_any_interval(), 0..12),
    ) {
        let hits = find_conflicts(&candidate, &existing);
        let expected: Vec<&Interval> = existing.iter().filter(|i| overlaps(&candidate, i)).collect();
        prop_assert_eq!(hits, expected);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Free slots and merged busy periods tile the window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn free_and_busy_partition_window(
        window in arb_interval(),
        busy in prop::collection::vec(arb_interval(), 0..10),
    ) {
        let free = find_free_slots(&busy, &window);
        let merged = merge_busy_periods(&busy, &window);

        let free_minutes: i64 = free.iter().map(|s| s.duration_minutes).sum();
        let busy_minutes: i64 = merged.iter().map(Interval::duration_minutes).sum();
        prop_assert_eq!(free_minutes + busy_minutes, window.duration_minutes());

        for slot in &free {
            prop_assert!(slot.duration_minutes > 0);
            let slot = Interval::new(slot.start, slot.end);
            prop_assert!(busy.iter().all(|b| !overlaps(&slot, b)));
        }
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "merged periods must be disjoint and apart");
        }
    }
}
