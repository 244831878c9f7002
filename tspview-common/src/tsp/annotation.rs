//! Annotations (markers) attached to the chart or to individual rows

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use super::entry::{EntryId, OutputElementStyle};
use crate::time::{TimeRange, Timestamp};

/// Entry id the server uses for annotations spanning the whole chart
pub const WHOLE_MODEL_ENTRY_ID: EntryId = -1;

/// Annotation kind; only `Chart` annotations are drawn on the time graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnnotationKind {
    Chart,
    Tree,
    #[serde(other)]
    Other,
}

/// Where an annotation belongs once the sentinel id is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationTarget {
    /// Drawn across the whole model
    RangeEvent,
    /// Drawn on one row
    Row(EntryId),
}

impl AnnotationTarget {
    pub fn from_entry_id(entry_id: EntryId) -> Self {
        if entry_id == WHOLE_MODEL_ENTRY_ID {
            AnnotationTarget::RangeEvent
        } else {
            AnnotationTarget::Row(entry_id)
        }
    }

    /// Id used when building local annotation identifiers
    pub fn entry_id(&self) -> EntryId {
        match self {
            AnnotationTarget::RangeEvent => WHOLE_MODEL_ENTRY_ID,
            AnnotationTarget::Row(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnotation {
    pub time: Timestamp,
    #[serde(default)]
    pub duration: Timestamp,
    #[serde(default = "default_entry_id")]
    pub entry_id: EntryId,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: AnnotationKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputElementStyle>,
}

fn default_entry_id() -> EntryId {
    WHOLE_MODEL_ENTRY_ID
}

fn default_kind() -> AnnotationKind {
    AnnotationKind::Chart
}

impl RawAnnotation {
    pub fn chart(
        entry_id: EntryId,
        time: Timestamp,
        duration: Timestamp,
        label: impl Into<String>,
    ) -> Self {
        Self {
            time,
            duration,
            entry_id,
            kind: AnnotationKind::Chart,
            label: label.into(),
            style: None,
        }
    }

    pub fn target(&self) -> AnnotationTarget {
        AnnotationTarget::from_entry_id(self.entry_id)
    }

    /// `[time, time + duration)`
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.time, self.time + self.duration)
    }
}

/// Model returned by the annotations endpoint, keyed by category
///
/// Categories keep the order the server sent them in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationModel {
    #[serde(default)]
    pub annotations: IndexMap<String, Vec<RawAnnotation>>,
}
