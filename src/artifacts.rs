//! Required stack files.
//!
//! The files are only checked for existence; the compose tool and the
//! services themselves interpret them.

use crate::error::StackError;
use std::path::{Path, PathBuf};

pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Files that must exist under the stack root before the stack is touched.
pub const REQUIRED_ARTIFACTS: [&str; 5] = [
    COMPOSE_FILE,
    "prometheus/prometheus.yml",
    "grafana/provisioning/datasources/datasource.yml",
    "grafana/provisioning/dashboards/dashboard.yml",
    "nginx/nginx.conf",
];

/// Every required artifact that is absent (or not a regular file), in order.
pub fn missing_artifacts(root: &Path) -> Vec<PathBuf> {
    REQUIRED_ARTIFACTS
        .iter()
        .map(PathBuf::from)
        .filter(|relative| !root.join(relative).is_file())
        .collect()
}

/// Fail with every missing path when the stack root is incomplete.
pub fn validate(root: &Path) -> Result<(), StackError> {
    let missing = missing_artifacts(root);
    if missing.is_empty() {
        return Ok(());
    }

    for path in &missing {
        tracing::warn!(path = %root.join(path).display(), "Required file missing");
    }

    Err(StackError::MissingArtifacts {
        root: root.to_path_buf(),
        missing,
    })
}
