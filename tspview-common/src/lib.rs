//! # tspview Common Library
//!
//! Shared code for the tspview crates including:
//! - Trace Server Protocol wire types (entries, states, annotations, arrows, queries)
//! - Renderer-ready output model (rows, segments, arrows)
//! - Time range and re-basing helpers
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod model;
pub mod time;
pub mod tsp;

pub use error::{Error, Result};
pub use time::TimeRange;
