use async_trait::async_trait;
use reqwest::{Client, Response};
use satfusion_core::config::LayeredConfig;
use satfusion_core::error::{FusionError, RemoteError, Result};
use satfusion_core::models::{
    AnalysisRequest, AnalysisType, CompareResult, LandCoverResult, NdviResult,
};
use satfusion_core::ports::AnalysisService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP adapter for the remote analysis service
pub struct HttpAnalysisClient {
    /// Base URL, e.g. "http://localhost:8000"
    base_url: String,

    /// Per-request timeout
    timeout: Duration,

    /// HTTP client
    client: Client,
}

impl HttpAnalysisClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            FusionError::ConfigInvalid {
                key: "http_client".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    /// Create from resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::new(
            config.api_url.value.clone(),
            Duration::from_secs(config.request_timeout_secs.value),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> std::result::Result<serde_json::Value, RemoteError> {
        self.get_json("/health").await
    }

    /// `GET /api/satellite/sources`
    pub async fn sources(&self) -> std::result::Result<serde_json::Value, RemoteError> {
        self.get_json("/api/satellite/sources").await
    }

    /// `POST /api/satellite/query`: scenes matching the request window
    pub async fn query_scenes(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<serde_json::Value, RemoteError> {
        self.post_json("/api/satellite/query", request).await
    }

    /// `POST /api/analysis/merge`: multi-source composite
    pub async fn merge_composite(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<serde_json::Value, RemoteError> {
        self.post_json("/api/analysis/merge", request).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response =
            self.client.get(&url).send().await.map_err(|e| self.transport_error(&url, e))?;
        self.decode(&url, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(
            url = %url,
            body = %serde_json::to_string(body).unwrap_or_default(),
            "POST"
        );

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        self.decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Response,
    ) -> std::result::Result<T, RemoteError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            warn!(
                url = %url,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or("-"),
                "Analysis service returned an error"
            );
            return Err(RemoteError::Rejected { status: status.as_u16(), detail });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(url, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "Analysis service returned an unexpected body");
            RemoteError::MalformedResponse { reason: e.to_string() }
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> RemoteError {
        let reason = if error.is_timeout() {
            format!("request to {} timed out after {}s", url, self.timeout.as_secs())
        } else {
            format!("failed to reach {}: {}", url, error)
        };
        warn!("{}", reason);
        RemoteError::Transport { reason }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn landcover(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<LandCoverResult, RemoteError> {
        self.post_json(AnalysisType::Landcover.endpoint(), request).await
    }

    async fn ndvi(&self, request: &AnalysisRequest) -> std::result::Result<NdviResult, RemoteError> {
        self.post_json(AnalysisType::Ndvi.endpoint(), request).await
    }

    async fn compare(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<CompareResult, RemoteError> {
        self.post_json(AnalysisType::Compare.endpoint(), request).await
    }
}

/// Pull the `detail` field out of an error body.
///
/// String details are returned as-is; structured details (e.g. a list of
/// field errors) are returned as compact JSON. Empty, null or missing
/// details yield `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
