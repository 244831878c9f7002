//! Row ordering and materialization
//!
//! [`order_rows`] makes the row list a pure function of the request: one
//! row per requested id, in request order, with a synthetic empty row
//! wherever the server returned nothing.
//!
//! [`materialize_row`] turns a raw row into a [`RowModel`]. Styled states
//! become segments as-is. An unstyled state is the server saying "no data
//! here": it is not drawn, but if the next state starts more than one unit
//! after it ends, the hole between them becomes a gap segment.

use std::collections::HashMap;
use tspview_common::model::{RowModel, StateSegment};
use tspview_common::time::{rebase, TimeRange, Timestamp};
use tspview_common::tsp::{Entry, EntryId, OutputElementStyle, RawRow, RawState};

/// Fill color of gap segments when the entry has no style
pub const GAP_BACKGROUND_COLOR: &str = "#CACACA";

/// Height of gap segments when the entry has no style
pub const GAP_HEIGHT: f64 = 1.0;

/// Style used for gaps of entries that carry no style of their own
pub fn default_gap_style() -> OutputElementStyle {
    OutputElementStyle::with_parent("")
        .with_value("background-color", GAP_BACKGROUND_COLOR)
        .with_value("height", GAP_HEIGHT)
}

/// Row standing in for a requested id the server did not return
pub fn empty_row(entry_id: EntryId) -> RawRow {
    RawRow::new(
        entry_id,
        vec![RawState {
            start: 0,
            end: 0,
            label: Some(String::new()),
            tags: Some(0),
            style: None,
        }],
    )
}

/// Reorder fetched rows to match `requested_ids` exactly
///
/// When the server returns the same entry twice, the first row wins.
pub fn order_rows(requested_ids: &[EntryId], fetched: Vec<RawRow>) -> Vec<RawRow> {
    let mut by_id: HashMap<EntryId, RawRow> = HashMap::with_capacity(fetched.len());
    for row in fetched {
        by_id.entry(row.entry_id).or_insert(row);
    }

    requested_ids
        .iter()
        .map(|id| by_id.get(id).cloned().unwrap_or_else(|| empty_row(*id)))
        .collect()
}

/// True when `next` leaves a hole after `state`
fn leaves_gap(state: &RawState, next: &RawState) -> bool {
    next.start > state.end.saturating_add(1)
}

/// Build the renderable row for `row`
///
/// `total_length` is the running re-based maximum end over every state
/// seen so far; it is raised, never lowered.
pub fn materialize_row(
    row: &RawRow,
    chart_start: Timestamp,
    entry: &Entry,
    total_length: &mut Timestamp,
) -> RowModel {
    let row_id = row.entry_id;
    let gap_style = entry.style.clone().unwrap_or_else(default_gap_style);

    let mut states = Vec::with_capacity(row.states.len());
    for (idx, state) in row.states.iter().enumerate() {
        let end = rebase(state.end, chart_start);
        *total_length = (*total_length).max(end);

        match &state.style {
            Some(style) => states.push(StateSegment {
                id: format!("{}-{}", row_id, idx),
                label: state.label.clone().unwrap_or_default(),
                range: state.range().rebased(chart_start),
                style: style.clone(),
            }),
            None => {
                if let Some(next) = row.states.get(idx + 1).filter(|next| leaves_gap(state, next)) {
                    states.push(StateSegment {
                        id: format!("{}-{}", row_id, idx),
                        label: String::new(),
                        range: TimeRange::new(end, rebase(next.start, chart_start)),
                        style: gap_style.clone(),
                    });
                }
            }
        }
    }

    let prev_possible_state = row
        .states
        .first()
        .map_or(entry.start, |state| state.start);
    let next_possible_state = row.states.last().map_or(entry.end, |state| state.end);

    RowModel {
        id: row_id,
        name: entry.name().to_string(),
        range: entry.range().rebased(chart_start),
        states,
        annotations: Vec::new(),
        prev_possible_state: rebase(prev_possible_state, chart_start),
        next_possible_state: rebase(next_possible_state, chart_start),
    }
}
