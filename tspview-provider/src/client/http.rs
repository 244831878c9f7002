//! HTTP trace server client
//!
//! Posts [`Query`] payloads to
//! `{base}/experiments/{uuid}/outputs/timeGraph/{output}/{endpoint}` and
//! unwraps the generic `{"model", "status", "statusMessage"}` envelope.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use tspview_common::config::ServerConfig;
use tspview_common::tsp::{AnnotationModel, EntryModel, Query, RawArrow, StateModel, TspResponse};
use tspview_common::{Error, Result};
use uuid::Uuid;

use super::{TooltipModel, TspClient};

const USER_AGENT: &str = concat!("tspview/", env!("CARGO_PKG_VERSION"));

/// Time graph endpoint names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Tree,
    States,
    Annotations,
    Arrows,
    Tooltip,
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::Tree => "tree",
            Endpoint::States => "states",
            Endpoint::Annotations => "annotations",
            Endpoint::Arrows => "arrows",
            Endpoint::Tooltip => "tooltip",
        }
    }
}

/// reqwest-backed [`TspClient`]
pub struct HttpTspClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTspClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, trace_uuid: &Uuid, output_id: &str, endpoint: Endpoint) -> String {
        format!(
            "{}/experiments/{}/outputs/timeGraph/{}/{}",
            self.base_url,
            trace_uuid,
            output_id,
            endpoint.path()
        )
    }

    async fn post<T: DeserializeOwned>(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<T> {
        let url = self.endpoint_url(trace_uuid, output_id, endpoint);
        let what = endpoint.path();

        debug!(
            endpoint = what,
            times = query.requested_times().len(),
            items = query.requested_items().len(),
            "Posting time graph query"
        );

        let response = self
            .http_client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| Error::FetchFailure(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::FetchFailure(format!(
                "{} returned HTTP {}: {}",
                what,
                status.as_u16(),
                error_text
            )));
        }

        let envelope: TspResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::FetchFailure(format!("Failed to parse {} response: {}", what, e)))?;

        envelope.into_model(what)
    }
}

#[async_trait]
impl TspClient for HttpTspClient {
    async fn fetch_tree(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<EntryModel> {
        self.post(trace_uuid, output_id, Endpoint::Tree, query).await
    }

    async fn fetch_states(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<StateModel> {
        self.post(trace_uuid, output_id, Endpoint::States, query).await
    }

    async fn fetch_annotations(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<AnnotationModel> {
        self.post(trace_uuid, output_id, Endpoint::Annotations, query)
            .await
    }

    async fn fetch_arrows(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<Vec<RawArrow>> {
        self.post(trace_uuid, output_id, Endpoint::Arrows, query).await
    }

    async fn fetch_tooltip(
        &self,
        trace_uuid: &Uuid,
        output_id: &str,
        query: &Query,
    ) -> Result<TooltipModel> {
        self.post(trace_uuid, output_id, Endpoint::Tooltip, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpTspClient::new("http://localhost:8080/tsp/api", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client =
            HttpTspClient::new("http://localhost:8080/tsp/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/tsp/api");
    }

    #[test]
    fn test_endpoint_url_layout() {
        let client = HttpTspClient::new("http://host/tsp/api", Duration::from_secs(5)).unwrap();
        let uuid = Uuid::nil();
        assert_eq!(
            client.endpoint_url(&uuid, "org.eclipse.tracecompass.threadstatus", Endpoint::States),
            concat!(
                "http://host/tsp/api/experiments/00000000-0000-0000-0000-000000000000",
                "/outputs/timeGraph/org.eclipse.tracecompass.threadstatus/states"
            )
        );
    }

    #[test]
    fn test_from_config_defaults() {
        let client = HttpTspClient::from_config(&ServerConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/tsp/api");
    }
}
