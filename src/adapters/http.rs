//! HTTP backend speaking the verification service's JSON API.
//!
//! Endpoints:
//! - `POST /ask` with `{"query": "..."}` returns a verification result
//! - `GET /` returns `{"message": "..."}` when the service is up

use std::error::Error as _;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{Backend, BackendError};
use crate::config::ResolvedConfig;
use crate::domain::{AskRequest, VerificationResult};

/// Verification service client over HTTP
pub struct HttpBackend {
    /// Base address, e.g. `http://localhost:5000`
    base_url: Url,
    /// Per-request timeout (none means wait indefinitely)
    timeout: Option<Duration>,
    client: reqwest::Client,
}

/// Greeting returned by `GET /`
#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    message: Option<String>,
}

impl HttpBackend {
    /// Create a backend for the service at `base_url`
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    /// Create from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        Self::new(&config.api_base, config.timeout)
    }

    /// Base address requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL relative to the base address
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    /// Turn a reqwest failure into a readable fault description
    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            if let Some(timeout) = self.timeout {
                return format!("Request timed out after {}s", timeout.as_secs_f64());
            }
        }

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, query), fields(base = %self.base_url))]
    async fn ask(&self, query: &str) -> Result<VerificationResult, BackendError> {
        let url = self.endpoint("ask");
        debug!(%url, query, "Sending verification request");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&AskRequest { query })
            .send()
            .await
            .map_err(|e| BackendError::Transport(self.describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Verification service rejected request");
            return Err(BackendError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(self.describe(&e)))?;

        serde_json::from_str(&body).map_err(|e| BackendError::Malformed(e.to_string()))
    }

    async fn health_check(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .get(self.endpoint(""))
            .send()
            .await
            .map_err(|e| BackendError::Transport(self.describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(self.describe(&e)))?;

        // Older deployments answer with plain text
        let greeting = serde_json::from_str::<HealthResponse>(&body)
            .ok()
            .and_then(|h| h.message)
            .unwrap_or_else(|| body.trim().to_string());

        Ok(greeting)
    }
}

/// Parse and check a base address
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("Invalid API base address: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "API base address must use http or https, got '{}'",
            url.scheme()
        );
    }

    Ok(url)
}
