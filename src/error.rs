//! Error types for stack operations.

use crate::runner::CommandStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by stack commands.
#[derive(Debug, Error)]
pub enum StackError {
    /// A required host tool is not installed
    #[error("{name} is not installed. {hint}")]
    MissingDependency { name: String, hint: String },

    /// Required stack files are absent
    #[error("missing required files under {}: {}", .root.display(), format_paths(.missing))]
    MissingArtifacts { root: PathBuf, missing: Vec<PathBuf> },

    /// Neither compose form is available
    #[error("neither 'docker compose' nor 'docker-compose' is available")]
    ComposeNotFound,

    /// No host address could be determined
    #[error("could not determine the host address. Set STACK_HOST_IP to this machine's IP")]
    HostUnresolved,

    /// One or more health checks did not pass
    #[error("health checks failed: {}", .0.join(", "))]
    HealthCheckFailed(Vec<String>),

    /// An external command exited unsuccessfully
    #[error("'{command}' failed ({status})")]
    CommandFailed {
        command: String,
        status: CommandStatus,
    },

    /// An external command could not be started
    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackError {
    /// Fatal errors end the interactive menu; the rest return to the prompt.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StackError::MissingDependency { .. }
                | StackError::MissingArtifacts { .. }
                | StackError::ComposeNotFound
                | StackError::HostUnresolved
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
