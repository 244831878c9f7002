//! Time graph data provider
//!
//! [`TspDataProvider::build_model`] turns one request (row ids, their
//! entries, the chart range and an optional zoomed view) into a complete
//! [`TimeGraphModel`]. States, annotations and arrows are fetched
//! concurrently. A failed sub-fetch only removes its own features from
//! the model: rows are still produced for every requested id, in request
//! order.
//!
//! The provider keeps one piece of state across builds: the widest
//! re-based time ever observed (`total_length`), which only grows.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use tspview_common::config::DEFAULT_RESOLUTION;
use tspview_common::model::{ArrowSegment, RowModel, TimeGraphModel};
use tspview_common::time::{TimeRange, Timestamp};
use tspview_common::tsp::{Entry, EntryId, EntryModel, Query, RawRow};
use tspview_common::{Error, Result};
use uuid::Uuid;

use crate::client::{TooltipModel, TspClient};

pub mod annotations;
pub mod arrows;
pub mod query;
pub mod rows;
pub mod tooltip;

pub use annotations::{group_annotations, AnnotationGroups};
pub use arrows::{arrow_origin, map_arrows};
pub use query::{arrow_query, interval_query, split_range_into_equal_parts, ViewRequest};
pub use rows::{default_gap_style, empty_row, materialize_row, order_rows};
pub use tooltip::{annotation_tooltip_query, state_tooltip_query, HoveredElement};

/// Inputs of one model build
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Rows to produce, in display order
    pub requested_ids: Vec<EntryId>,
    /// Descriptors of the requested rows (extra entries are ignored)
    pub entries: Vec<Entry>,
    /// Whole chart range; its start is the re-basing origin
    pub total_range: TimeRange,
    /// Zoomed view; arrows are only fetched when present
    pub view: Option<ViewRequest>,
    /// Marker categories to restrict annotations to
    pub marker_categories: Option<Vec<String>>,
}

impl ModelRequest {
    pub fn new(requested_ids: Vec<EntryId>, entries: Vec<Entry>, total_range: TimeRange) -> Self {
        Self {
            requested_ids,
            entries,
            total_range,
            view: None,
            marker_categories: None,
        }
    }

    pub fn with_view(mut self, view: ViewRequest) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_marker_categories(mut self, categories: Vec<String>) -> Self {
        self.marker_categories = Some(categories);
        self
    }
}

/// Builds renderer-ready models for one time graph output of one trace
pub struct TspDataProvider {
    client: Arc<dyn TspClient>,
    trace_uuid: Uuid,
    output_id: String,
    default_resolution: NonZeroUsize,
    total_length: AtomicI64,
}

impl TspDataProvider {
    pub fn new(client: Arc<dyn TspClient>, trace_uuid: Uuid, output_id: impl Into<String>) -> Self {
        Self {
            client,
            trace_uuid,
            output_id: output_id.into(),
            default_resolution: NonZeroUsize::new(DEFAULT_RESOLUTION).unwrap_or(NonZeroUsize::MIN),
            total_length: AtomicI64::new(0),
        }
    }

    /// Sample count used when a build has no view
    pub fn with_default_resolution(mut self, resolution: NonZeroUsize) -> Self {
        self.default_resolution = resolution;
        self
    }

    pub fn trace_uuid(&self) -> &Uuid {
        &self.trace_uuid
    }

    pub fn output_id(&self) -> &str {
        &self.output_id
    }

    /// Widest re-based time observed so far
    pub fn total_length(&self) -> Timestamp {
        self.total_length.load(Ordering::SeqCst)
    }

    /// Fetch the entry tree over `range`
    pub async fn fetch_entries(&self, range: TimeRange) -> Result<EntryModel> {
        let query = Query::time(vec![range.start, range.end]);
        self.client
            .fetch_tree(&self.trace_uuid, &self.output_id, &query)
            .await
    }

    /// Assemble the model for `request`
    ///
    /// Never fails: a sub-fetch that errors contributes nothing. With no
    /// requested ids nothing is fetched and the model is empty.
    pub async fn build_model(&self, request: &ModelRequest) -> TimeGraphModel {
        let chart_start = request.total_range.start;
        let ids = &request.requested_ids;

        if ids.is_empty() {
            debug!(output_id = %self.output_id, "No rows requested, skipping fetches");
            return TimeGraphModel::empty(self.total_length(), chart_start);
        }

        let query = interval_query(
            request.total_range,
            request.view.as_ref(),
            ids,
            request.marker_categories.as_deref(),
            self.default_resolution,
        );
        let origin = arrow_origin(ids, &request.entries, chart_start);

        debug!(
            output_id = %self.output_id,
            rows = ids.len(),
            samples = query.requested_times().len(),
            zoomed = request.view.is_some(),
            "Building time graph model"
        );

        let (states, annotations, arrows) = tokio::join!(
            self.client.fetch_states(&self.trace_uuid, &self.output_id, &query),
            self.client.fetch_annotations(&self.trace_uuid, &self.output_id, &query),
            self.build_arrows(ids, origin, request.view.as_ref()),
        );

        let fetched_rows = match states {
            Ok(model) => model.rows,
            Err(e) => {
                self.log_degraded("states", &e);
                Vec::new()
            }
        };

        let mut observed_length = request.total_range.length();
        let mut rows = self.materialize_rows(request, fetched_rows, &mut observed_length);

        let range_events = match annotations {
            Ok(model) => group_annotations(&model, chart_start).attach(&mut rows),
            Err(e) => {
                self.log_degraded("annotations", &e);
                Vec::new()
            }
        };

        let previous = self.total_length.fetch_max(observed_length, Ordering::SeqCst);
        let total_length = previous.max(observed_length);

        debug!(
            rows = rows.len(),
            range_events = range_events.len(),
            arrows = arrows.len(),
            total_length,
            "Time graph model assembled"
        );

        TimeGraphModel {
            total_length,
            rows,
            range_events,
            arrows,
            original_start: chart_start,
        }
    }

    /// Fetch and map the arrows between `requested_ids`
    ///
    /// `origin` is the absolute time arrow ranges are re-based against,
    /// normally [`arrow_origin`] of the same ids. Nothing is fetched
    /// without a view or without ids.
    pub async fn build_arrows(
        &self,
        requested_ids: &[EntryId],
        origin: Timestamp,
        view: Option<&ViewRequest>,
    ) -> Vec<ArrowSegment> {
        let Some(view) = view else {
            return Vec::new();
        };
        if requested_ids.is_empty() {
            return Vec::new();
        }

        let query = arrow_query(view, origin, requested_ids);
        match self
            .client
            .fetch_arrows(&self.trace_uuid, &self.output_id, &query)
            .await
        {
            Ok(arrows) => map_arrows(&arrows, requested_ids, origin),
            Err(e) => {
                self.log_degraded("arrows", &e);
                Vec::new()
            }
        }
    }

    /// Details of a hovered state, `None` when the server has none
    pub async fn state_tooltip(
        &self,
        element: &HoveredElement,
        offset: Option<Timestamp>,
    ) -> Option<TooltipModel> {
        self.tooltip(state_tooltip_query(element, offset)).await
    }

    /// Details of a hovered annotation, `None` when the server has none
    pub async fn annotation_tooltip(
        &self,
        element: &HoveredElement,
        offset: Option<Timestamp>,
    ) -> Option<TooltipModel> {
        self.tooltip(annotation_tooltip_query(element, offset)).await
    }

    async fn tooltip(&self, query: Query) -> Option<TooltipModel> {
        match self
            .client
            .fetch_tooltip(&self.trace_uuid, &self.output_id, &query)
            .await
        {
            Ok(model) => Some(model),
            Err(e) => {
                self.log_degraded("tooltip", &e);
                None
            }
        }
    }

    fn materialize_rows(
        &self,
        request: &ModelRequest,
        fetched_rows: Vec<RawRow>,
        observed_length: &mut Timestamp,
    ) -> Vec<RowModel> {
        let chart_start = request.total_range.start;
        let entries: HashMap<EntryId, &Entry> = request
            .entries
            .iter()
            .rev()
            .map(|entry| (entry.id, entry))
            .collect();

        order_rows(&request.requested_ids, fetched_rows)
            .iter()
            .map(|row| match entries.get(&row.entry_id) {
                Some(entry) => materialize_row(row, chart_start, entry, observed_length),
                None => {
                    warn!(
                        entry_id = row.entry_id,
                        "Requested row has no entry, using chart bounds"
                    );
                    let fallback = Entry::new(
                        row.entry_id,
                        "",
                        request.total_range.start,
                        request.total_range.end,
                    );
                    materialize_row(row, chart_start, &fallback, observed_length)
                }
            })
            .collect()
    }

    fn log_degraded(&self, what: &str, error: &Error) {
        match error {
            Error::EmptyResult(_) => debug!(
                output_id = %self.output_id,
                fetch = what,
                "Server returned no model"
            ),
            e if e.is_degradable() => warn!(
                output_id = %self.output_id,
                fetch = what,
                error = %e,
                "Fetch failed, continuing without it"
            ),
            e => warn!(
                output_id = %self.output_id,
                fetch = what,
                error = %e,
                "Unexpected fetch error, continuing without it"
            ),
        }
    }
}
