//! Trace Server Protocol wire types
//!
//! JSON shapes exchanged with the trace server's time graph endpoints.
//! Field names follow the protocol (camelCase for models, snake_case for
//! query parameters); Rust names are idiomatic snake_case.

pub mod annotation;
pub mod entry;
pub mod query;
pub mod response;
pub mod timegraph;

pub use annotation::{
    AnnotationKind, AnnotationModel, AnnotationTarget, RawAnnotation, WHOLE_MODEL_ENTRY_ID,
};
pub use entry::{Entry, EntryHeader, EntryId, EntryModel, OutputElementStyle, StyleValue};
pub use query::{ElementType, Query, QueryParameters, RequestedElement};
pub use response::{ResponseStatus, TspResponse};
pub use timegraph::{RawArrow, RawRow, RawState, StateModel};
