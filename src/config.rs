//! Generation service endpoint configuration.
//!
//! Resolution order:
//! 1. `--endpoint` flag
//! 2. `COMMIT_SUGGEST_ENDPOINT` environment variable
//! 3. `http://localhost:8080`

use std::env;
use std::fmt;

use tracing::debug;

use crate::error::PipelineError;

/// Base endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Environment variable overriding the base endpoint.
pub const ENDPOINT_ENV_VAR: &str = "COMMIT_SUGGEST_ENDPOINT";

/// Path of the generation route, appended to the base endpoint.
pub const GENERATE_PATH: &str = "/api/commit/generate";

/// Validated base URL of the generation service, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Parse an absolute http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let trimmed = raw.trim();
        let url = reqwest::Url::parse(trimmed).map_err(|e| {
            PipelineError::InvalidConfig(format!("invalid endpoint '{}': {}", trimmed, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(PipelineError::InvalidConfig(format!(
                "endpoint '{}' must use http or https",
                trimmed
            )));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(PipelineError::InvalidConfig(format!(
                "endpoint '{}' has no host",
                trimmed
            )));
        }

        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the endpoint from the flag, the environment, or the default.
    pub fn resolve(flag: Option<&str>) -> Result<Self, PipelineError> {
        if let Some(value) = flag.filter(|v| !v.trim().is_empty()) {
            debug!("Using endpoint from --endpoint: {}", value);
            return Self::parse(value);
        }

        match env::var(ENDPOINT_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => {
                debug!("Using endpoint from {}: {}", ENDPOINT_ENV_VAR, value);
                Self::parse(&value)
            }
            _ => Self::parse(DEFAULT_ENDPOINT),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Full URL of the generation route.
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base, GENERATE_PATH)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
