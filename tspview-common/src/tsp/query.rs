//! Query payloads posted to the time graph endpoints
//!
//! On the wire a query is `{"parameters": {...}}` with snake_case keys.
//! Optional parameters are omitted when unset.

use serde::{Deserialize, Serialize};

use super::entry::EntryId;
use crate::time::Timestamp;

/// Kind of element a tooltip is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    State,
    Annotation,
}

/// Element description carried by a tooltip query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedElement {
    pub element_type: ElementType,
    pub time: Timestamp,
    pub duration: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParameters {
    #[serde(default)]
    pub requested_times: Vec<Timestamp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requested_items: Vec<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_marker_categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_element: Option<RequestedElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    pub parameters: QueryParameters,
}

impl Query {
    /// Query over sample times only (tree fetch)
    pub fn time(times: Vec<Timestamp>) -> Self {
        Self {
            parameters: QueryParameters {
                requested_times: times,
                ..Default::default()
            },
        }
    }

    /// Query over sample times restricted to `items`
    pub fn selection(times: Vec<Timestamp>, items: Vec<EntryId>) -> Self {
        Self {
            parameters: QueryParameters {
                requested_times: times,
                requested_items: items,
                ..Default::default()
            },
        }
    }

    pub fn with_marker_categories(mut self, categories: Option<Vec<String>>) -> Self {
        self.parameters.requested_marker_categories = categories;
        self
    }

    pub fn with_requested_element(mut self, element: RequestedElement) -> Self {
        self.parameters.requested_element = Some(element);
        self
    }

    pub fn requested_times(&self) -> &[Timestamp] {
        &self.parameters.requested_times
    }

    pub fn requested_items(&self) -> &[EntryId] {
        &self.parameters.requested_items
    }
}
