//! Shared test utilities for stackctl integration tests.
//!
//! Provides a recording command runner, a scripted HTTP probe and helpers
//! for building stack directories and configurations.

#![allow(dead_code)]

use async_trait::async_trait;
use stackctl::artifacts::REQUIRED_ARTIFACTS;
use stackctl::config::StackConfig;
use stackctl::health::HealthCheckError;
use stackctl::probe::{HttpProbe, ProbeResponse};
use stackctl::runner::{CapturedOutput, CommandRunner, CommandStatus, Invocation};
use stackctl::Controller;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Command Runner
// =============================================================================

/// Records every invocation instead of spawning processes.
#[derive(Default)]
pub struct FakeRunner {
    available: HashSet<String>,
    compose_plugin: bool,
    route_output: Option<String>,
    failures: Vec<(String, i32)>,
    runs: Mutex<Vec<Invocation>>,
    captures: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    /// Docker with the compose plugin installed.
    pub fn with_plugin() -> Self {
        Self {
            compose_plugin: true,
            ..Self::default()
        }
        .available("docker")
    }

    /// Docker without the plugin, plus standalone docker-compose.
    pub fn with_standalone() -> Self {
        Self::default().available("docker").available("docker-compose")
    }

    pub fn available(mut self, program: &str) -> Self {
        self.available.insert(program.to_string());
        self
    }

    /// Output of `ip route get`. Unset means the tool is missing.
    pub fn route(mut self, output: &str) -> Self {
        self.route_output = Some(output.to_string());
        self
    }

    /// Exit with `code` for any run whose command line contains `pattern`.
    pub fn fail_on(mut self, pattern: &str, code: i32) -> Self {
        self.failures.push((pattern.to_string(), code));
        self
    }

    pub fn runs(&self) -> Vec<Invocation> {
        self.runs.lock().unwrap().clone()
    }

    pub fn captures(&self) -> Vec<Invocation> {
        self.captures.lock().unwrap().clone()
    }

    /// Compose arguments after the `-f <file>` pair, one string per run.
    pub fn compose_calls(&self) -> Vec<String> {
        self.runs()
            .iter()
            .filter_map(|inv| {
                let pos = inv.args.iter().position(|a| a == "-f")?;
                Some(inv.args[pos + 2..].join(" "))
            })
            .collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus> {
        self.runs.lock().unwrap().push(invocation.clone());
        let line = invocation.command_line();
        let code = self
            .failures
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0);
        Ok(CommandStatus::from_code(Some(code)))
    }

    async fn capture(&self, invocation: &Invocation) -> io::Result<CapturedOutput> {
        self.captures.lock().unwrap().push(invocation.clone());
        match invocation.program.as_str() {
            "docker" if invocation.args == ["compose", "version"] => Ok(CapturedOutput {
                status: CommandStatus::from_code(Some(if self.compose_plugin { 0 } else { 1 })),
                stdout: String::new(),
            }),
            "ip" => match &self.route_output {
                Some(output) => Ok(CapturedOutput {
                    status: CommandStatus::success(),
                    stdout: output.clone(),
                }),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "ip not found")),
            },
            other => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", other),
            )),
        }
    }

    async fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }
}

// =============================================================================
// HTTP Probe
// =============================================================================

/// Answers from a URL map; unknown URLs fail to connect.
#[derive(Default)]
pub struct FakeProbe {
    responses: HashMap<String, ProbeResponse>,
    requested: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), ProbeResponse::with_status(status, body));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpProbe for FakeProbe {
    async fn get(&self, url: &str) -> ProbeResponse {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses.get(url).cloned().unwrap_or_else(|| {
            ProbeResponse::failed(HealthCheckError::ConnectionFailed(
                "connection refused".to_string(),
            ))
        })
    }
}

// =============================================================================
// Stack Builders
// =============================================================================

/// A temporary stack directory with every required file present.
pub fn complete_stack_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    for relative in REQUIRED_ARTIFACTS {
        let path = dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "# fixture").unwrap();
    }
    dir
}

/// Configuration rooted at `root` with a fixed host address.
pub fn config_for(root: &Path) -> StackConfig {
    let mut config = StackConfig {
        root: root.to_path_buf(),
        ..StackConfig::default()
    };
    config.host.address = Some("10.1.2.3".to_string());
    config
}

pub fn controller(config: StackConfig, runner: FakeRunner) -> Controller<FakeRunner, FakeProbe> {
    Controller::new(config, runner, FakeProbe::default())
}

// =============================================================================
// Mock Stack
// =============================================================================

pub const COLLECTOR_METRICS: &str = "\
# HELP ollama_models_loaded Number of models loaded in Ollama
# TYPE ollama_models_loaded gauge
ollama_models_loaded 1.0
# HELP ollama_inference_requests_total Total number of inference requests
# TYPE ollama_inference_requests_total counter
ollama_inference_requests_total 3.0
";

pub const TARGETS_UP: &str = r#"{"status":"success","data":{"activeTargets":[{"labels":{"job":"llm-metrics"},"health":"up"},{"labels":{"job":"cadvisor"},"health":"down"}]}}"#;

/// One mock server per published service.
pub struct MockStack {
    pub metrics: MockServer,
    pub prometheus: MockServer,
    pub grafana: MockServer,
    pub cadvisor: MockServer,
}

impl MockStack {
    pub async fn start() -> Self {
        Self {
            metrics: MockServer::start().await,
            prometheus: MockServer::start().await,
            grafana: MockServer::start().await,
            cadvisor: MockServer::start().await,
        }
    }

    /// Every service healthy, with `metrics_body` served by the proxy.
    pub async fn healthy(metrics_body: &str) -> Self {
        let stack = Self::start().await;
        mount(&stack.metrics, "/metrics", 200, metrics_body).await;
        mount(&stack.prometheus, "/-/ready", 200, "Prometheus Server is Ready.").await;
        mount(&stack.prometheus, "/api/v1/targets", 200, TARGETS_UP).await;
        mount(&stack.grafana, "/login", 200, "<!DOCTYPE html><title>Grafana</title>").await;
        mount(&stack.cadvisor, "/metrics", 200, "container_cpu_usage_seconds_total 1").await;
        stack
    }

    pub fn config(&self) -> StackConfig {
        let mut config = StackConfig::default();
        config.host.address = Some("127.0.0.1".to_string());
        config.ports.metrics_proxy = self.metrics.address().port();
        config.ports.prometheus = self.prometheus.address().port();
        config.ports.grafana = self.grafana.address().port();
        config.ports.cadvisor = self.cadvisor.address().port();
        config
    }

    /// `STACK_*` port variables pointing the binary at these servers.
    pub fn port_env(&self) -> [(&'static str, String); 4] {
        [
            ("STACK_METRICS_PORT", self.metrics.address().port().to_string()),
            ("STACK_PROMETHEUS_PORT", self.prometheus.address().port().to_string()),
            ("STACK_GRAFANA_PORT", self.grafana.address().port().to_string()),
            ("STACK_CADVISOR_PORT", self.cadvisor.address().port().to_string()),
        ]
    }
}

pub async fn mount(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}
