//! Test Helper Utilities
//!
//! Shared utilities for testing tspview-provider

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use tspview_common::tsp::{
    AnnotationModel, Entry, EntryId, EntryModel, OutputElementStyle, Query, RawArrow, RawRow,
    RawState, StateModel,
};
use tspview_common::{Error, Result};
use tspview_provider::{TooltipModel, TspClient};
use uuid::Uuid;

/// Capability a scripted client can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Tree,
    States,
    Annotations,
    Arrows,
    Tooltip,
}

/// One recorded call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub capability: Capability,
    pub output_id: String,
    pub query: Query,
}

/// In-memory [`TspClient`] answering with canned models
#[derive(Default)]
pub struct ScriptedClient {
    pub tree: EntryModel,
    pub states: StateModel,
    pub annotations: AnnotationModel,
    pub arrows: Vec<RawArrow>,
    pub tooltip: Option<TooltipModel>,
    failing: Vec<Capability>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.tree = EntryModel {
            entries,
            headers: Vec::new(),
        };
        self
    }

    pub fn with_rows(mut self, rows: Vec<RawRow>) -> Self {
        self.states = StateModel { rows };
        self
    }

    pub fn with_annotations(mut self, annotations: AnnotationModel) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_arrows(mut self, arrows: Vec<RawArrow>) -> Self {
        self.arrows = arrows;
        self
    }

    pub fn with_tooltip(mut self, tooltip: TooltipModel) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Make every call to `capability` fail with `FetchFailure`
    pub fn failing(mut self, capability: Capability) -> Self {
        self.failing.push(capability);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, capability: Capability) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.capability == capability)
            .collect()
    }

    fn answer<T: Clone>(
        &self,
        capability: Capability,
        output_id: &str,
        query: &Query,
        model: &T,
    ) -> Result<T> {
        self.calls.lock().unwrap().push(RecordedCall {
            capability,
            output_id: output_id.to_string(),
            query: query.clone(),
        });

        if self.failing.contains(&capability) {
            return Err(Error::FetchFailure(format!("{:?} scripted to fail", capability)));
        }
        Ok(model.clone())
    }
}

#[async_trait]
impl TspClient for ScriptedClient {
    async fn fetch_tree(
        &self,
        _trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<EntryModel> {
        self.answer(Capability::Tree, output_id, query, &self.tree)
    }

    async fn fetch_states(
        &self,
        _trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<StateModel> {
        self.answer(Capability::States, output_id, query, &self.states)
    }

    async fn fetch_annotations(
        &self,
        _trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<AnnotationModel> {
        self.answer(Capability::Annotations, output_id, query, &self.annotations)
    }

    async fn fetch_arrows(
        &self,
        _trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<Vec<RawArrow>> {
        self.answer(Capability::Arrows, output_id, query, &self.arrows)
    }

    async fn fetch_tooltip(
        &self,
        _trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<TooltipModel> {
        self.answer(Capability::Tooltip, output_id, query, &self.tooltip)?
            .ok_or_else(|| Error::EmptyResult("tooltip".to_string()))
    }
}

pub fn running() -> OutputElementStyle {
    OutputElementStyle::with_parent("RUNNING")
}

/// Row of back-to-back styled states covering `[start, end]` in `step` chunks
pub fn busy_row(entry_id: EntryId, start: i64, end: i64, step: i64) -> RawRow {
    let mut states = Vec::new();
    let mut t = start;
    while t < end {
        let next = (t + step).min(end);
        states.push(RawState::styled(t, next, running()));
        t = next;
    }
    RawRow::new(entry_id, states)
}
