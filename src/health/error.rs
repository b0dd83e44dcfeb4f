//! Error types for health probes.

use thiserror::Error;

/// Why a probe request produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthCheckError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Response body could not be read
    #[error("invalid response: {0}")]
    ParseError(String),
}
