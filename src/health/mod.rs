//! Stack health checking.
//!
//! Runs five HTTP probes against the published services in a fixed order.
//! Every probe runs regardless of earlier failures; the stack is healthy only
//! when all five pass.

mod config;
mod error;
pub mod parser;

pub use config::*;
pub use error::*;

use crate::endpoints::Endpoints;
use crate::probe::{HttpProbe, ProbeResponse};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Result of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    /// Reachable but not serving what was expected
    Warn,
    Fail,
}

/// One line of a [`HealthReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthEntry {
    pub service: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl HealthEntry {
    fn new(service: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            service,
            status,
            message: message.into(),
        }
    }
}

/// Ordered outcome of a full health check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub entries: Vec<HealthEntry>,
}

impl HealthReport {
    /// True only when every entry passed. Warnings count as failures.
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|e| e.status == CheckStatus::Pass)
    }

    /// Services whose check did not pass, in check order.
    pub fn failures(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.status != CheckStatus::Pass)
            .map(|e| e.service.to_string())
            .collect()
    }
}

/// Runs the probe sequence against one set of endpoints.
pub struct HealthChecker<'a, P: ?Sized> {
    probe: &'a P,
    endpoints: &'a Endpoints,
}

impl<'a, P> HealthChecker<'a, P>
where
    P: HttpProbe + ?Sized,
{
    pub fn new(probe: &'a P, endpoints: &'a Endpoints) -> Self {
        Self { probe, endpoints }
    }

    /// Run all five checks in order.
    pub async fn run(&self) -> HealthReport {
        let entries = vec![
            self.check_metrics_proxy().await,
            self.check_prometheus_ready().await,
            self.check_prometheus_targets().await,
            self.check_grafana().await,
            self.check_cadvisor().await,
        ];

        for entry in &entries {
            tracing::debug!(service = entry.service, status = ?entry.status, message = %entry.message, "Health check");
        }

        HealthReport { entries }
    }

    /// Collector metrics through the reverse proxy.
    pub async fn check_metrics_proxy(&self) -> HealthEntry {
        const SERVICE: &str = "metrics-proxy";
        let response = self.probe.get(&self.endpoints.metrics).await;
        if !response.is_ok() {
            return HealthEntry::new(
                SERVICE,
                CheckStatus::Fail,
                format!("unreachable ({})", response.describe()),
            );
        }
        if parser::has_metrics_markers(&response.body) {
            HealthEntry::new(SERVICE, CheckStatus::Pass, "serving metrics")
        } else {
            HealthEntry::new(
                SERVICE,
                CheckStatus::Warn,
                "reachable, but no recognized metrics in the response",
            )
        }
    }

    pub async fn check_prometheus_ready(&self) -> HealthEntry {
        let url = format!("{}/-/ready", self.endpoints.prometheus);
        status_only("prometheus", self.probe.get(&url).await, "ready")
    }

    pub async fn check_prometheus_targets(&self) -> HealthEntry {
        const SERVICE: &str = "prometheus-targets";
        let url = format!("{}/api/v1/targets", self.endpoints.prometheus);
        let response = self.probe.get(&url).await;
        if !response.is_ok() {
            return HealthEntry::new(
                SERVICE,
                CheckStatus::Fail,
                format!("target query failed ({})", response.describe()),
            );
        }
        if parser::has_healthy_target(&response.body) {
            HealthEntry::new(SERVICE, CheckStatus::Pass, "at least one target up")
        } else {
            HealthEntry::new(SERVICE, CheckStatus::Fail, "no healthy targets")
        }
    }

    pub async fn check_grafana(&self) -> HealthEntry {
        let url = format!("{}/login", self.endpoints.grafana);
        status_only("grafana", self.probe.get(&url).await, "login page up")
    }

    pub async fn check_cadvisor(&self) -> HealthEntry {
        let url = format!("{}/metrics", self.endpoints.cadvisor);
        status_only("cadvisor", self.probe.get(&url).await, "exporting metrics")
    }
}

fn status_only(service: &'static str, response: ProbeResponse, ok_message: &str) -> HealthEntry {
    if response.is_ok() {
        HealthEntry::new(service, CheckStatus::Pass, ok_message)
    } else {
        HealthEntry::new(service, CheckStatus::Fail, response.describe())
    }
}

/// Format a report as pretty text
pub fn format_report(report: &HealthReport) -> String {
    let mut output = String::new();

    for entry in &report.entries {
        let icon = match entry.status {
            CheckStatus::Pass => "✓".green(),
            CheckStatus::Warn => "⚠".yellow(),
            CheckStatus::Fail => "✗".red(),
        };
        writeln!(output, "  {} {:<20} {}", icon, entry.service, entry.message).unwrap();
    }

    writeln!(output).unwrap();
    if report.passed() {
        writeln!(output, "Status: {}", "Healthy".green()).unwrap();
    } else {
        writeln!(
            output,
            "Status: {} (failed: {})",
            "Unhealthy".red(),
            report.failures().join(", ")
        )
        .unwrap();
    }

    output
}
