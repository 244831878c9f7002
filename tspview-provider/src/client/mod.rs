//! Trace server fetch collaborator
//!
//! The provider never talks HTTP itself: it consumes a [`TspClient`], one
//! async method per time graph endpoint. [`HttpTspClient`] is the
//! production implementation; tests substitute scripted clients.
//!
//! Every method reports a server-side failure as
//! [`Error::FetchFailure`](tspview_common::Error::FetchFailure) and a
//! successful answer without payload as
//! [`Error::EmptyResult`](tspview_common::Error::EmptyResult). Retrying is
//! the implementation's business, never the provider's.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tspview_common::tsp::{AnnotationModel, EntryModel, Query, RawArrow, StateModel};
use tspview_common::Result;
use uuid::Uuid;

pub mod http;

pub use http::HttpTspClient;

/// Tooltip details as returned by the server
pub type TooltipModel = BTreeMap<String, String>;

#[async_trait]
pub trait TspClient: Send + Sync {
    /// Entry tree (row descriptors) of a time graph output
    async fn fetch_tree(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<EntryModel>;

    async fn fetch_states(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<StateModel>;

    async fn fetch_annotations(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<AnnotationModel>;

    async fn fetch_arrows(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<Vec<RawArrow>>;

    async fn fetch_tooltip(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<TooltipModel>;
}
