//! # tspview Provider Library
//!
//! Builds renderer-ready time graph models from Trace Server Protocol
//! query results.
//!
//! **Purpose:** Fetch states, annotations and arrows for a set of rows and
//! merge them into one self-consistent [`TimeGraphModel`](tspview_common::model::TimeGraphModel):
//! rows in request order, gaps synthesized, everything re-based to the
//! chart origin.
//!
//! **Architecture:** [`TspDataProvider`] owns the transformation and talks
//! to the server only through the [`TspClient`] trait.

pub mod client;
pub mod provider;

pub use client::{HttpTspClient, TooltipModel, TspClient};
pub use provider::{HoveredElement, ModelRequest, TspDataProvider, ViewRequest};
