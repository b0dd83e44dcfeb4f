//! Configuration for health checking.

use serde::{Deserialize, Serialize};

/// Configuration for the stack health probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Timeout for each probe request
    pub timeout_seconds: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self { timeout_seconds: 5 }
    }
}
