//! Service endpoints: display summary and browser launch.

use crate::config::StackConfig;
use crate::host::HOST_PLACEHOLDER;
use crate::runner::{CommandRunner, Invocation};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::fmt::Write;
use std::path::PathBuf;

/// URLs of the four published services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Collector metrics through the reverse proxy
    pub metrics: String,
    pub prometheus: String,
    pub grafana: String,
    pub cadvisor: String,
    pub root: PathBuf,
    /// Whether a real host address was used
    pub resolved: bool,
}

impl Endpoints {
    /// Build URLs for `host`, falling back to a placeholder when unknown.
    pub fn new(config: &StackConfig, host: Option<&str>) -> Self {
        let resolved = host.is_some();
        let host = host.unwrap_or(HOST_PLACEHOLDER);
        let ports = &config.ports;
        Self {
            metrics: format!("http://{}:{}/metrics", host, ports.metrics_proxy),
            prometheus: format!("http://{}:{}", host, ports.prometheus),
            grafana: format!("http://{}:{}", host, ports.grafana),
            cadvisor: format!("http://{}:{}", host, ports.cadvisor),
            root: config.root.clone(),
            resolved,
        }
    }

    /// Services opened by [`open_in_browser`]. The metrics proxy is not a UI.
    pub fn browsable(&self) -> [(&'static str, &str); 3] {
        [
            ("Grafana", self.grafana.as_str()),
            ("Prometheus", self.prometheus.as_str()),
            ("cAdvisor", self.cadvisor.as_str()),
        ]
    }

    fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Grafana", self.grafana.as_str()),
            ("Prometheus", self.prometheus.as_str()),
            ("cAdvisor", self.cadvisor.as_str()),
            ("LLM metrics", self.metrics.as_str()),
        ]
    }
}

/// Format the endpoint summary shown by `info`, `up` and a passing `test`.
pub fn format_summary(endpoints: &Endpoints, config: &StackConfig) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "URL"]);
    for (name, url) in endpoints.rows() {
        table.add_row(vec![Cell::new(name), Cell::new(url)]);
    }

    let mut output = String::new();
    writeln!(output, "{}", "Stack endpoints".bold()).unwrap();
    writeln!(output, "{}", table).unwrap();
    writeln!(output, "Stack directory: {}", endpoints.root.display()).unwrap();
    writeln!(
        output,
        "Grafana login:   {} (password from GRAFANA_ADMIN_PASSWORD)",
        config.credentials.user
    )
    .unwrap();

    if !endpoints.resolved {
        writeln!(output).unwrap();
        writeln!(
            output,
            "{} host address unknown; set STACK_HOST_IP to this machine's IP",
            "⚠".yellow()
        )
        .unwrap();
    }

    output
}

/// Program used to open URLs on this platform.
pub fn browser_launcher() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Open the browsable endpoints. A missing launcher is only a warning.
///
/// Returns the number of URLs handed to the launcher successfully.
pub async fn open_in_browser<R>(endpoints: &Endpoints, runner: &R) -> usize
where
    R: CommandRunner + ?Sized,
{
    let launcher = browser_launcher();
    if !runner.is_available(launcher).await {
        println!(
            "{} {} not found; open these URLs manually:",
            "⚠".yellow(),
            launcher
        );
        for (name, url) in endpoints.browsable() {
            println!("  {}: {}", name, url);
        }
        return 0;
    }

    let mut opened = 0;
    for (name, url) in endpoints.browsable() {
        let inv = Invocation::new(launcher).arg(url);
        match runner.run(&inv).await {
            Ok(status) if status.is_success() => {
                println!("{} Opened {} ({})", "✓".green(), name, url);
                opened += 1;
            }
            Ok(status) => {
                tracing::warn!(url, %status, "Browser launcher failed");
                println!("{} Could not open {} ({})", "⚠".yellow(), name, url);
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Browser launcher failed to start");
                println!("{} Could not open {} ({})", "⚠".yellow(), name, url);
            }
        }
    }
    opened
}
