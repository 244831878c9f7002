//! Arrow mapping
//!
//! Arrows name their endpoints by entry id; the renderer wants positions
//! in the requested id list. Arrows touching an entry that is not in the
//! list are discarded.

use std::collections::HashMap;
use tspview_common::model::ArrowSegment;
use tspview_common::time::{TimeRange, Timestamp};
use tspview_common::tsp::{Entry, EntryId, RawArrow};

/// Origin arrow timestamps are re-based against
///
/// This is the start of the first requested entry, which is not
/// necessarily the chart start. Falls back to the first known entry, then
/// to `fallback`.
pub fn arrow_origin(
    requested_ids: &[EntryId],
    entries: &[Entry],
    fallback: Timestamp,
) -> Timestamp {
    requested_ids
        .first()
        .and_then(|first| entries.iter().find(|entry| entry.id == *first))
        .or_else(|| entries.first())
        .map_or(fallback, |entry| entry.start)
}

/// Keep arrows whose endpoints are both requested and index them
///
/// An id listed more than once resolves to its first position.
pub fn map_arrows(
    arrows: &[RawArrow],
    requested_ids: &[EntryId],
    origin: Timestamp,
) -> Vec<ArrowSegment> {
    let mut positions: HashMap<EntryId, usize> = HashMap::with_capacity(requested_ids.len());
    for (index, id) in requested_ids.iter().enumerate() {
        positions.entry(*id).or_insert(index);
    }

    arrows
        .iter()
        .filter_map(|arrow| {
            let source_index = *positions.get(&arrow.source_id)?;
            let destination_index = *positions.get(&arrow.target_id)?;
            Some(ArrowSegment {
                source_index,
                destination_index,
                range: TimeRange::new(arrow.start, arrow.end).rebased(origin),
            })
        })
        .collect()
}
