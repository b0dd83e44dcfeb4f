//! HTTP probing.
//!
//! Probes never fail: transport errors are folded into the returned
//! [`ProbeResponse`] so callers only ever look at status, body and error.

use crate::health::HealthCheckError;
use async_trait::async_trait;
use std::time::Duration;

/// Outcome of a single GET request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status, `None` when no response arrived
    pub status: Option<u16>,
    pub body: String,
    pub error: Option<HealthCheckError>,
}

impl ProbeResponse {
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            error: None,
        }
    }

    pub fn failed(error: HealthCheckError) -> Self {
        Self {
            status: None,
            body: String::new(),
            error: Some(error),
        }
    }

    /// A 200 whose body could not be read does not count.
    pub fn is_ok(&self) -> bool {
        self.status == Some(200) && self.error.is_none()
    }

    /// Short reason for a non-200 outcome.
    pub fn describe(&self) -> String {
        match (&self.error, self.status) {
            (Some(error), _) => error.to_string(),
            (None, Some(status)) => format!("HTTP {}", status),
            (None, None) => "no response".to_string(),
        }
    }
}

/// Capability to issue probe requests.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn get(&self, url: &str) -> ProbeResponse;
}

/// Probe backed by a reqwest client with a short timeout.
pub struct ReqwestProbe {
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl ReqwestProbe {
    pub fn new(timeout_seconds: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self::with_client(client, timeout_seconds))
    }

    /// Create a probe with custom HTTP client (for testing).
    pub fn with_client(client: reqwest::Client, timeout_seconds: u64) -> Self {
        Self {
            client,
            timeout_seconds,
        }
    }

    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> HealthCheckError {
        if e.is_timeout() {
            HealthCheckError::Timeout(timeout_seconds)
        } else {
            // All other errors treated as connection failures
            HealthCheckError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &str) -> ProbeResponse {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "Probe request failed");
                return ProbeResponse::failed(Self::classify_error(e, self.timeout_seconds));
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ProbeResponse::with_status(status, body),
            Err(e) => ProbeResponse {
                status: Some(status),
                body: String::new(),
                error: Some(HealthCheckError::ParseError(e.to_string())),
            },
        }
    }
}
