//! HTTP client for the commit generation service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Endpoint;
use crate::error::PipelineError;
use crate::generate::request::GenerationRequest;

/// Fixed timeout applied to every generation call, whatever produced the diff.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message used when a failed call carries no usable `commitMessage`.
const GENERIC_FAILURE: &str = "Something went wrong";

/// Structured suggestions returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub commit_message: String,
    pub alternatives: Vec<String>,
    /// Distinct labels in the order the service returned them.
    pub type_labels: Vec<String>,
    pub pr_title: Option<String>,
    pub pr_body: Option<String>,
}

/// Response body as it appears on the wire. Only `commitMessage` is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    commit_message: String,
    #[serde(default)]
    alternatives: Option<Vec<String>>,
    #[serde(default)]
    type_labels: Option<Vec<String>>,
    #[serde(default)]
    pr_title: Option<String>,
    #[serde(default)]
    pr_body: Option<String>,
}

/// Error bodies may still carry a human-readable `commitMessage`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    commit_message: Option<String>,
}

/// Calls the generation service.
///
/// This abstraction allows mocking the service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one request. Failures are terminal; callers do not retry.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, PipelineError>;
}

/// JSON-over-HTTP client posting to `{endpoint}/api/commit/generate`.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpGenerationClient {
    pub fn new(endpoint: &Endpoint) -> Result<Self, PipelineError> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// Build a client with a non-default timeout.
    pub fn with_timeout(endpoint: &Endpoint, timeout: Duration) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: endpoint.generate_url(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, err: reqwest::Error) -> PipelineError {
        let message = if err.is_timeout() {
            format!("request timed out after {} seconds", self.timeout.as_secs())
        } else if err.is_connect() {
            format!("could not connect to {}", self.url)
        } else {
            format!("request to {} failed: {}", self.url, err)
        };
        warn!("Generation request failed: {}", err);
        PipelineError::BackendError { message }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, PipelineError> {
        debug!(
            "POST {} (style={}, alternatives={}, pr={}, diff={} bytes)",
            self.url,
            request.style(),
            request.num_alternatives(),
            request.generate_pr(),
            request.diff_content().len()
        );

        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Backend returned HTTP {}", status);
            let message = backend_message(&body)
                .unwrap_or_else(|| format!("{} (HTTP {})", GENERIC_FAILURE, status.as_u16()));
            return Err(PipelineError::BackendError { message });
        }

        parse_response(&body, request.num_alternatives())
    }
}

/// Extract a non-empty `commitMessage` from an error body, if any.
fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.commit_message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Parse a 2xx body, keeping at most `max_alternatives` alternatives and the
/// first occurrence of each label.
fn parse_response(body: &str, max_alternatives: u8) -> Result<GenerationResponse, PipelineError> {
    let wire: WireResponse = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        debug!("Unparseable backend response: {}", preview);
        PipelineError::MalformedResponse(e.to_string())
    })?;

    let mut alternatives = wire.alternatives.unwrap_or_default();
    let max = usize::from(max_alternatives);
    if alternatives.len() > max {
        warn!(
            "Backend returned {} alternatives, keeping the first {}",
            alternatives.len(),
            max
        );
        alternatives.truncate(max);
    }

    let mut type_labels: Vec<String> = Vec::new();
    for label in wire.type_labels.unwrap_or_default() {
        if !type_labels.contains(&label) {
            type_labels.push(label);
        }
    }

    Ok(GenerationResponse {
        commit_message: wire.commit_message,
        alternatives,
        type_labels,
        pr_title: wire.pr_title,
        pr_body: wire.pr_body,
    })
}
