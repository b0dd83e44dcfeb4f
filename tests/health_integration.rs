//! Health checks against mock HTTP servers.

mod common;

use common::{
    complete_stack_root, config_for, mount, FakeProbe, FakeRunner, MockStack, COLLECTOR_METRICS,
};
use stackctl::config::StackConfig;
use stackctl::health::CheckStatus;
use stackctl::probe::ReqwestProbe;
use stackctl::{Controller, StackError};

fn real_controller(config: StackConfig) -> Controller<FakeRunner, ReqwestProbe> {
    Controller::new(config, FakeRunner::default(), ReqwestProbe::new(5).unwrap())
}

#[tokio::test]
async fn test_healthy_stack_passes_all_checks() {
    let stack = MockStack::healthy(COLLECTOR_METRICS).await;
    let ctl = real_controller(stack.config());

    let (report, _) = ctl.health_report().await.unwrap();

    assert_eq!(report.entries.len(), 5);
    assert!(report.passed(), "report: {:?}", report);
    assert!(ctl.test(false).await.is_ok());
}

#[tokio::test]
async fn test_metrics_without_markers_is_warning_and_aggregate_failure() {
    let stack = MockStack::healthy("<html><body>Welcome to nginx!</body></html>").await;
    let ctl = real_controller(stack.config());

    let (report, _) = ctl.health_report().await.unwrap();
    assert_eq!(report.entries[0].status, CheckStatus::Warn);
    assert!(report.entries[1..]
        .iter()
        .all(|e| e.status == CheckStatus::Pass));

    match ctl.test(false).await.unwrap_err() {
        StackError::HealthCheckFailed(failed) => assert_eq!(failed, vec!["metrics-proxy"]),
        other => panic!("Expected HealthCheckFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_proxy_fails_but_later_checks_still_run() {
    let stack = MockStack::healthy(COLLECTOR_METRICS).await;
    let mut config = stack.config();
    // Nothing listens on the proxy port any more
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    config.ports.metrics_proxy = port;
    let ctl = real_controller(config);

    let (report, _) = ctl.health_report().await.unwrap();

    assert_eq!(report.entries[0].status, CheckStatus::Fail);
    assert_eq!(report.failures(), vec!["metrics-proxy"]);
}

#[tokio::test]
async fn test_no_healthy_targets_fails() {
    let stack = MockStack::start().await;
    mount(&stack.metrics, "/metrics", 200, COLLECTOR_METRICS).await;
    mount(&stack.prometheus, "/-/ready", 200, "ready").await;
    mount(
        &stack.prometheus,
        "/api/v1/targets",
        200,
        r#"{"status":"success","data":{"activeTargets":[{"health":"down"}]}}"#,
    )
    .await;
    mount(&stack.grafana, "/login", 200, "ok").await;
    mount(&stack.cadvisor, "/metrics", 503, "").await;
    let ctl = real_controller(stack.config());

    let (report, _) = ctl.health_report().await.unwrap();

    assert_eq!(report.failures(), vec!["prometheus-targets", "cadvisor"]);
}

#[tokio::test]
async fn test_unresolved_host_fails_fast() {
    let root = complete_stack_root();
    let mut config = config_for(root.path());
    config.host.address = None;
    let ctl = Controller::new(config, FakeRunner::default(), FakeProbe::default());

    let err = ctl.test(false).await.unwrap_err();

    assert!(matches!(err, StackError::HostUnresolved));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_probes_use_detected_host() {
    let root = complete_stack_root();
    let mut config = config_for(root.path());
    config.host.address = None;
    let runner = FakeRunner::default().route("1.1.1.1 dev wlan0 src 172.16.4.9 uid 1000");
    let ctl = Controller::new(config, runner, FakeProbe::default());

    let (report, endpoints) = ctl.health_report().await.unwrap();

    assert!(!report.passed());
    assert_eq!(endpoints.metrics, "http://172.16.4.9:8080/metrics");
}

#[tokio::test]
async fn test_json_report_still_fails_on_unhealthy_stack() {
    let root = complete_stack_root();
    let probe = FakeProbe::default().respond("http://10.1.2.3:3000/login", 200, "ok");
    let ctl = Controller::new(config_for(root.path()), FakeRunner::default(), probe);

    let err = ctl.test(true).await.unwrap_err();

    match err {
        StackError::HealthCheckFailed(failed) => {
            assert_eq!(failed.len(), 4);
            assert!(!failed.contains(&"grafana".to_string()));
        }
        other => panic!("Expected HealthCheckFailed, got {:?}", other),
    }
}
