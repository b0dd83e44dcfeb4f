//! Published service ports

use serde::{Deserialize, Serialize};

/// Host ports the stack publishes, one per service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    /// Reverse proxy in front of the metrics collector
    pub metrics_proxy: u16,
    pub prometheus: u16,
    pub grafana: u16,
    pub cadvisor: u16,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            metrics_proxy: 8080,
            prometheus: 9090,
            grafana: 3000,
            cadvisor: 8081,
        }
    }
}

impl PortsConfig {
    /// Ports paired with their config field names, in display order.
    pub fn named(&self) -> [(&'static str, u16); 4] {
        [
            ("ports.metrics_proxy", self.metrics_proxy),
            ("ports.prometheus", self.prometheus),
            ("ports.grafana", self.grafana),
            ("ports.cadvisor", self.cadvisor),
        ]
    }
}
