//! Time graph rows, states and arrows as returned by the trace server

use serde::{Deserialize, Serialize};

use super::entry::{EntryId, OutputElementStyle};
use crate::time::{TimeRange, Timestamp};

/// One interval of a row
///
/// Within a row, states are ordered by `start` and do not overlap. A state
/// without `style` is a placeholder the server uses for "no data".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawState {
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputElementStyle>,
}

impl RawState {
    /// Unstyled placeholder state
    pub fn placeholder(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn styled(start: Timestamp, end: Timestamp, style: OutputElementStyle) -> Self {
        Self {
            start,
            end,
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Per-entry result of a state fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    pub entry_id: EntryId,
    #[serde(default)]
    pub states: Vec<RawState>,
}

impl RawRow {
    pub fn new(entry_id: EntryId, states: Vec<RawState>) -> Self {
        Self { entry_id, states }
    }
}

/// Model returned by the states endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateModel {
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

/// Directed relation between two entries' states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArrow {
    pub source_id: EntryId,
    pub target_id: EntryId,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputElementStyle>,
}

impl RawArrow {
    pub fn new(source_id: EntryId, target_id: EntryId, start: Timestamp, end: Timestamp) -> Self {
        Self {
            source_id,
            target_id,
            start,
            end,
            style: None,
        }
    }
}
