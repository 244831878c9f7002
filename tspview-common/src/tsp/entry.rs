//! Time graph entries and element styles

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::time::{TimeRange, Timestamp};

/// Server-assigned entry identifier
pub type EntryId = i64;

/// Visual style attached to an entry, state or annotation
///
/// `values` is ordered so that serialized models are byte-stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, StyleValue>,
}

impl OutputElementStyle {
    /// Style inheriting from a named style of the output's style model
    pub fn with_parent(parent_key: impl Into<String>) -> Self {
        Self {
            parent_key: Some(parent_key.into()),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// Style property value (colors are strings, sizes are numbers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// Caller-owned row descriptor (`TimeGraphEntry` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntryId>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default = "default_has_data")]
    pub has_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputElementStyle>,
}

fn default_has_data() -> bool {
    true
}

impl Entry {
    pub fn new(id: EntryId, label: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            id,
            parent_id: None,
            labels: vec![label.into()],
            start,
            end,
            has_data: true,
            style: None,
        }
    }

    pub fn with_style(mut self, style: OutputElementStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// First label, or empty when the server sent none
    pub fn name(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }

    /// Declared absolute bounds
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Column header of the entry tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryHeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Model returned by the tree endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryModel {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub headers: Vec<EntryHeader>,
}

impl EntryModel {
    /// Smallest start and largest end over all entries
    pub fn total_range(&self) -> Option<TimeRange> {
        let start = self.entries.iter().map(|e| e.start).min()?;
        let end = self.entries.iter().map(|e| e.end).max()?;
        Some(TimeRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserialize_defaults() {
        let json = r#"{"id": 7, "labels": ["thread-1"], "start": 100, "end": 200}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name(), "thread-1");
        assert!(entry.has_data);
        assert!(entry.parent_id.is_none());
        assert!(entry.style.is_none());
    }

    #[test]
    fn test_entry_name_without_labels() {
        let mut entry = Entry::new(1, "x", 0, 1);
        entry.labels.clear();
        assert_eq!(entry.name(), "");
    }

    #[test]
    fn test_style_mixed_values() {
        let json = r##"{"parentKey": "RUNNING",
            "values": {"background-color": "#CACACA", "height": 0.5}}"##;
        let style: OutputElementStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.parent_key.as_deref(), Some("RUNNING"));
        assert_eq!(
            style.values.get("background-color"),
            Some(&StyleValue::Text("#CACACA".to_string()))
        );
        assert_eq!(style.values.get("height"), Some(&StyleValue::Number(0.5)));
    }

    #[test]
    fn test_total_range_over_entries() {
        let model = EntryModel {
            entries: vec![Entry::new(1, "a", 50, 90), Entry::new(2, "b", 10, 70)],
            headers: vec![],
        };
        assert_eq!(model.total_range(), Some(TimeRange::new(10, 90)));
        assert_eq!(EntryModel::default().total_range(), None);
    }
}
