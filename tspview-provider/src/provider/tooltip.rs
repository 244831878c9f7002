//! Point queries for hovered elements

use tspview_common::time::{TimeRange, Timestamp};
use tspview_common::tsp::{ElementType, EntryId, Query, RequestedElement};

/// Segment under the pointer, in chart-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoveredElement {
    pub row_id: EntryId,
    pub range: TimeRange,
}

impl HoveredElement {
    pub fn new(row_id: EntryId, range: TimeRange) -> Self {
        Self { row_id, range }
    }
}

/// Query for the details of a hovered state
///
/// Asks at the state's midpoint (rounded half up); the element itself is
/// described by its absolute start and its duration. `offset` converts
/// chart-relative times back to absolute ones and defaults to 0.
pub fn state_tooltip_query(element: &HoveredElement, offset: Option<Timestamp>) -> Query {
    let offset = offset.unwrap_or(0);
    let start = element.range.start + offset;
    let duration = element.range.length();
    let midpoint = start + (duration + 1).div_euclid(2);

    Query::selection(vec![midpoint], vec![element.row_id]).with_requested_element(RequestedElement {
        element_type: ElementType::State,
        time: start,
        duration,
        entry_id: None,
    })
}

/// Query for the details of a hovered annotation
pub fn annotation_tooltip_query(element: &HoveredElement, offset: Option<Timestamp>) -> Query {
    let start = element.range.start + offset.unwrap_or(0);

    Query::selection(vec![start], vec![element.row_id]).with_requested_element(RequestedElement {
        element_type: ElementType::Annotation,
        time: start,
        duration: element.range.length(),
        entry_id: Some(element.row_id),
    })
}
