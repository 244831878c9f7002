//! Generic response envelope of the trace server

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Progress of the analysis that backs a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Running,
    #[default]
    Completed,
    Failed,
    Cancelled,
}

/// `{"model": ..., "status": ..., "statusMessage": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TspResponse<T> {
    pub model: Option<T>,
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub status_message: String,
}

impl<T> TspResponse<T> {
    /// Unwrap the payload, mapping failed analyses and missing models to errors
    ///
    /// `what` names the fetch in error messages (e.g. "states").
    pub fn into_model(self, what: &str) -> Result<T> {
        match self.status {
            ResponseStatus::Failed | ResponseStatus::Cancelled => Err(Error::FetchFailure(format!(
                "{} analysis {:?}: {}",
                what, self.status, self.status_message
            ))),
            ResponseStatus::Running | ResponseStatus::Completed => self
                .model
                .ok_or_else(|| Error::EmptyResult(format!("{} response carried no model", what))),
        }
    }
}
