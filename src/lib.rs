//! stackctl - LLM monitoring stack controller
//!
//! Drives a compose-managed monitoring stack (metrics collector behind a
//! reverse proxy, Prometheus, Grafana and cAdvisor): validates its files,
//! delegates lifecycle commands to the compose tool, prints its endpoints and
//! health-checks the running services over HTTP.

pub mod artifacts;
pub mod cli;
pub mod compose;
pub mod config;
pub mod controller;
pub mod endpoints;
pub mod error;
pub mod health;
pub mod host;
pub mod logging;
pub mod probe;
pub mod runner;

pub use controller::Controller;
pub use error::StackError;
