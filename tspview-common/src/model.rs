//! Renderer-ready time graph model
//!
//! Everything in this module is re-based: timestamps are relative to
//! [`TimeGraphModel::original_start`] (rows, states, annotations) or to the
//! first requested entry's start (arrows). Row order matches the caller's
//! requested id order exactly.

use serde::{Deserialize, Serialize};

use crate::time::{TimeRange, Timestamp};
use crate::tsp::{EntryId, OutputElementStyle};

/// Contiguous labeled state of a row, or a synthesized gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSegment {
    /// `"{row_id}-{state_index}"`
    pub id: String,
    pub label: String,
    pub range: TimeRange,
    pub style: OutputElementStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSegment {
    /// `"{target_id}-{index_in_group}"`
    pub id: String,
    pub category: String,
    pub range: TimeRange,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputElementStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowModel {
    pub id: EntryId,
    pub name: String,
    /// Entry's declared bounds
    pub range: TimeRange,
    pub states: Vec<StateSegment>,
    pub annotations: Vec<AnnotationSegment>,
    /// Where real data begins
    pub prev_possible_state: Timestamp,
    /// Where real data ends
    pub next_possible_state: Timestamp,
}

/// Arrow between two rows, endpoints given as positions in the requested id list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowSegment {
    pub source_index: usize,
    pub destination_index: usize,
    pub range: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGraphModel {
    pub total_length: Timestamp,
    pub rows: Vec<RowModel>,
    /// Annotations not bound to a row
    pub range_events: Vec<AnnotationSegment>,
    pub arrows: Vec<ArrowSegment>,
    /// Absolute timestamp that maps to 0
    pub original_start: Timestamp,
}

impl TimeGraphModel {
    /// Model with no rows, arrows or range events
    pub fn empty(total_length: Timestamp, original_start: Timestamp) -> Self {
        Self {
            total_length,
            rows: Vec::new(),
            range_events: Vec::new(),
            arrows: Vec::new(),
            original_start,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.range_events.is_empty() && self.arrows.is_empty()
    }
}
