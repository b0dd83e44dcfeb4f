//! Configuration module for stackctl
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//! The result is built once at startup and passed by reference to every operation.
//!
//! # Configuration Precedence
//!
//! 1. Environment variables (`STACK_*`, `GRAFANA_ADMIN_*`) (highest priority)
//! 2. Configuration file (TOML), chosen with `--config` or `STACKCTL_CONFIG`
//! 3. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use stackctl::config::StackConfig;
//!
//! let config = StackConfig::default();
//! assert_eq!(config.ports.prometheus, 9090);
//!
//! let toml = r#"
//! [ports]
//! grafana = 3300
//! "#;
//! let config: StackConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.ports.grafana, 3300);
//! ```

pub mod credentials;
pub mod error;
pub mod logging;
pub mod ports;

pub use credentials::CredentialsConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use ports::PortsConfig;

// Re-export HealthCheckConfig from health module
pub use crate::health::HealthCheckConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const ENV_ROOT: &str = "STACK_ROOT";
pub const ENV_HOST_IP: &str = "STACK_HOST_IP";
pub const ENV_ADMIN_USER: &str = "GRAFANA_ADMIN_USER";
pub const ENV_ADMIN_PASSWORD: &str = "GRAFANA_ADMIN_PASSWORD";

/// Host address settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Address other machines use to reach the stack. Detected when unset.
    pub address: Option<String>,
}

/// Unified configuration for the stack controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Directory holding the compose file and service configuration
    pub root: PathBuf,
    pub host: HostConfig,
    pub credentials: CredentialsConfig,
    pub ports: PortsConfig,
    pub health_check: HealthCheckConfig,
    pub logging: LoggingConfig,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            host: HostConfig::default(),
            credentials: CredentialsConfig::default(),
            ports: PortsConfig::default(),
            health_check: HealthCheckConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StackConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Invalid values are silently ignored (defaults are kept). An empty
    /// host address counts as unset.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_ROOT).filter(|r| !r.is_empty()) {
            self.root = PathBuf::from(root);
        }
        if let Some(address) = lookup(ENV_HOST_IP) {
            let address = address.trim().to_string();
            self.host.address = (!address.is_empty()).then_some(address);
        }

        if let Some(user) = lookup(ENV_ADMIN_USER) {
            self.credentials.user = user;
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.credentials.password = password;
        }

        let port = |key: &str| lookup(key).and_then(|v| v.parse::<u16>().ok());
        if let Some(p) = port("STACK_METRICS_PORT") {
            self.ports.metrics_proxy = p;
        }
        if let Some(p) = port("STACK_PROMETHEUS_PORT") {
            self.ports.prometheus = p;
        }
        if let Some(p) = port("STACK_GRAFANA_PORT") {
            self.ports.grafana = p;
        }
        if let Some(p) = port("STACK_CADVISOR_PORT") {
            self.ports.cadvisor = p;
        }

        if let Some(timeout) = lookup("STACK_HTTP_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.health_check.timeout_seconds = timeout;
        }

        if let Some(level) = lookup("STACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STACK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (field, port) in self.ports.named() {
            if port == 0 {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "port must be non-zero".to_string(),
                });
            }
            if !seen.insert(port) {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: format!("port {} is already used by another service", port),
                });
            }
        }

        if self.health_check.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "health_check.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if self.credentials.user.is_empty() {
            return Err(ConfigError::Validation {
                field: "credentials.user".to_string(),
                message: "dashboard user cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Path of the compose file the stack is driven from.
    pub fn compose_file(&self) -> PathBuf {
        self.root.join(crate::artifacts::COMPOSE_FILE)
    }
}
