//! Property tests for row ordering, materialization and sampling

mod helpers;

use helpers::running;
use proptest::prelude::*;
use tspview_common::tsp::{Entry, RawRow, RawState};
use tspview_provider::provider::{materialize_row, order_rows, split_range_into_equal_parts};

/// Ordered, non-overlapping states starting at `origin`: (gap before, length, styled)
fn states_strategy() -> impl Strategy<Value = Vec<(i64, i64, bool)>> {
    prop::collection::vec((0i64..20, 0i64..50, any::<bool>()), 0..40)
}

fn build_states(origin: i64, shape: &[(i64, i64, bool)]) -> (Vec<RawState>, i64) {
    let mut t = origin;
    let mut states = Vec::with_capacity(shape.len());
    for &(gap, len, styled) in shape {
        let start = t + gap;
        let end = start + len;
        states.push(if styled {
            RawState::styled(start, end, running())
        } else {
            RawState::placeholder(start, end)
        });
        t = end;
    }
    (states, t)
}

proptest! {
    #[test]
    fn prop_rows_match_request(
        requested in prop::collection::vec(0i64..30, 0..25),
        returned in prop::collection::vec(0i64..40, 0..25),
    ) {
        let fetched: Vec<RawRow> = returned.iter().map(|id| RawRow::new(*id, vec![])).collect();
        let ordered = order_rows(&requested, fetched);
        let ids: Vec<i64> = ordered.iter().map(|row| row.entry_id).collect();
        prop_assert_eq!(ids, requested);
    }

    #[test]
    fn prop_segments_within_row_and_disjoint(
        chart_start in -1_000_000i64..1_000_000,
        entry_offset in 0i64..1_000,
        shape in states_strategy(),
    ) {
        let entry_start = chart_start + entry_offset;
        let (states, last_end) = build_states(entry_start, &shape);
        let entry = Entry::new(1, "row", entry_start, last_end);
        let row = RawRow::new(1, states);
        let mut total_length = 0;

        let model = materialize_row(&row, chart_start, &entry, &mut total_length);

        for segment in &model.states {
            prop_assert!(segment.range.start <= segment.range.end);
            prop_assert!(model.range.encloses(&segment.range));
        }
        for pair in model.states.windows(2) {
            prop_assert!(pair[0].range.end <= pair[1].range.start);
        }
        prop_assert!(total_length >= last_end - chart_start || shape.is_empty());
    }

    #[test]
    fn prop_samples_span_range(
        lo in -1_000_000_000_000i64..1_000_000_000_000,
        span in 1i64..1_000_000_000_000,
        n in 1i64..2_000,
    ) {
        let hi = lo + span;
        let times = split_range_into_equal_parts(lo, hi, n).unwrap();

        prop_assert_eq!(times.len() as i64, n);
        prop_assert_eq!(times[0], lo);
        if n > 1 {
            prop_assert_eq!(times[times.len() - 1], hi);
        }
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(times.iter().all(|t| *t >= lo && *t <= hi));
    }
}
