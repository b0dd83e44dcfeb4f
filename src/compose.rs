//! Compose tool resolution and stack lifecycle operations.
//!
//! Two invocation forms are supported: the `docker compose` plugin
//! (preferred) and the standalone `docker-compose` binary. The form is
//! detected on every run.

use crate::config::{StackConfig, ENV_ADMIN_PASSWORD, ENV_ADMIN_USER};
use crate::error::StackError;
use crate::runner::{CommandRunner, Invocation};

/// Container engine every compose form depends on.
pub const ENGINE: &str = "docker";

/// Lines shown by `logs` when no service is named.
pub const LOG_TAIL_LINES: u32 = 200;

/// Which compose invocation form is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeTool {
    /// `docker compose`
    Plugin,
    /// `docker-compose`
    Standalone,
}

impl ComposeTool {
    /// Detect the compose form, preferring the plugin.
    pub async fn resolve<R>(runner: &R) -> Result<Self, StackError>
    where
        R: CommandRunner + ?Sized,
    {
        if !runner.is_available(ENGINE).await {
            return Err(StackError::MissingDependency {
                name: ENGINE.to_string(),
                hint: "Install Docker: https://docs.docker.com/get-docker/".to_string(),
            });
        }

        let probe = Invocation::new(ENGINE).args(["compose", "version"]);
        match runner.capture(&probe).await {
            Ok(output) if output.status.is_success() => {
                tracing::debug!("Using docker compose plugin");
                return Ok(ComposeTool::Plugin);
            }
            Ok(_) | Err(_) => {}
        }

        if runner.is_available("docker-compose").await {
            tracing::debug!("Using standalone docker-compose");
            return Ok(ComposeTool::Standalone);
        }

        Err(StackError::ComposeNotFound)
    }

    /// Invocation prefix scoped to the stack's compose file.
    pub fn base_invocation(&self, config: &StackConfig) -> Invocation {
        let compose_file = config.compose_file().display().to_string();
        let inv = match self {
            ComposeTool::Plugin => Invocation::new(ENGINE).arg("compose"),
            ComposeTool::Standalone => Invocation::new("docker-compose"),
        };
        inv.args(["-f", compose_file.as_str()])
            .current_dir(&config.root)
    }
}

/// Lifecycle operations against one resolved compose tool.
pub struct Compose<'a, R: ?Sized> {
    tool: ComposeTool,
    config: &'a StackConfig,
    runner: &'a R,
}

impl<'a, R> Compose<'a, R>
where
    R: CommandRunner + ?Sized,
{
    pub fn new(tool: ComposeTool, config: &'a StackConfig, runner: &'a R) -> Self {
        Self {
            tool,
            config,
            runner,
        }
    }

    /// Resolve the compose tool and bind it to this configuration.
    pub async fn resolve(config: &'a StackConfig, runner: &'a R) -> Result<Self, StackError> {
        let tool = ComposeTool::resolve(runner).await?;
        Ok(Self::new(tool, config, runner))
    }

    pub fn tool(&self) -> ComposeTool {
        self.tool
    }

    /// Start the stack detached, exporting the dashboard credentials.
    pub async fn up(&self) -> Result<(), StackError> {
        let inv = self
            .tool
            .base_invocation(self.config)
            .args(["up", "-d"])
            .env(ENV_ADMIN_USER, &self.config.credentials.user)
            .env(ENV_ADMIN_PASSWORD, &self.config.credentials.password);
        self.exec(inv).await
    }

    pub async fn down(&self) -> Result<(), StackError> {
        self.exec(self.tool.base_invocation(self.config).arg("down"))
            .await
    }

    /// Stop then start. A failed stop leaves the stack untouched.
    pub async fn restart(&self) -> Result<(), StackError> {
        self.down().await?;
        self.up().await
    }

    pub async fn ps(&self) -> Result<(), StackError> {
        self.exec(self.tool.base_invocation(self.config).arg("ps"))
            .await
    }

    /// Follow one service, or print the recent tail across all services.
    pub async fn logs(&self, service: Option<&str>) -> Result<(), StackError> {
        let inv = self.tool.base_invocation(self.config).arg("logs");
        let inv = match service {
            Some(service) => inv.args(["-f", service]),
            None => inv.args(["--tail".to_string(), LOG_TAIL_LINES.to_string()]),
        };
        self.exec(inv).await
    }

    /// Stop the stack and delete its volumes.
    pub async fn clean(&self) -> Result<(), StackError> {
        self.exec(self.tool.base_invocation(self.config).args(["down", "-v"]))
            .await
    }

    async fn exec(&self, inv: Invocation) -> Result<(), StackError> {
        let command = inv.command_line();
        tracing::info!(command = %command, "Invoking compose");

        let status = self
            .runner
            .run(&inv)
            .await
            .map_err(|source| StackError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.is_success() {
            Ok(())
        } else {
            Err(StackError::CommandFailed { command, status })
        }
    }
}
