//! Response content checks.

/// Lines of the metrics body inspected for markers.
pub const METRICS_SCAN_LINES: usize = 50;

/// Strings that identify a Prometheus exposition from the collector.
pub const METRICS_MARKERS: [&str; 4] = [
    "# HELP",
    "# TYPE",
    "ollama_models_loaded",
    "ollama_inference_requests_total",
];

/// Marker of a scrape target reported as up.
pub const HEALTHY_TARGET_MARKER: &str = r#""health":"up""#;

/// Whether the first lines of `body` look like collector metrics.
pub fn has_metrics_markers(body: &str) -> bool {
    body.lines()
        .take(METRICS_SCAN_LINES)
        .any(|line| METRICS_MARKERS.iter().any(|marker| line.contains(marker)))
}

/// Whether a `/api/v1/targets` response mentions at least one healthy target.
///
/// Raw substring match on the serialized response; the JSON is not parsed.
pub fn has_healthy_target(body: &str) -> bool {
    body.contains(HEALTHY_TARGET_MARKER)
}
