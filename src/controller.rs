//! Stack controller: binds configuration, command runner and HTTP probe to
//! the stack commands.

use crate::artifacts;
use crate::cli::StackCommand;
use crate::compose::Compose;
use crate::config::StackConfig;
use crate::endpoints::{self, Endpoints};
use crate::error::StackError;
use crate::health::{self, HealthChecker, HealthReport};
use crate::host::resolve_host_address;
use crate::probe::HttpProbe;
use crate::runner::CommandRunner;
use colored::Colorize;

pub struct Controller<R, P> {
    config: StackConfig,
    runner: R,
    probe: P,
}

impl<R, P> Controller<R, P>
where
    R: CommandRunner,
    P: HttpProbe,
{
    pub fn new(config: StackConfig, runner: R, probe: P) -> Self {
        Self {
            config,
            runner,
            probe,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one command from the command table.
    pub async fn execute(&self, command: &StackCommand) -> Result<(), StackError> {
        tracing::debug!(command = command.name(), "Executing");
        match command {
            StackCommand::Up => self.up().await,
            StackCommand::Down => self.down().await,
            StackCommand::Restart => self.restart().await,
            StackCommand::Status => self.status().await,
            StackCommand::Logs { service } => self.logs(service.as_deref()).await,
            StackCommand::Test { json } => self.test(*json).await,
            StackCommand::Clean => self.clean().await,
            StackCommand::Info => self.info().await,
            StackCommand::Open => self.open().await,
        }
    }

    /// Validate the stack files, then resolve compose. Mutating commands only.
    async fn compose_for_change(&self) -> Result<Compose<'_, R>, StackError> {
        artifacts::validate(&self.config.root)?;
        Compose::resolve(&self.config, &self.runner).await
    }

    async fn compose(&self) -> Result<Compose<'_, R>, StackError> {
        Compose::resolve(&self.config, &self.runner).await
    }

    pub async fn up(&self) -> Result<(), StackError> {
        self.compose_for_change().await?.up().await?;
        println!("{} Stack started", "✓".green());
        self.info().await
    }

    pub async fn down(&self) -> Result<(), StackError> {
        self.compose_for_change().await?.down().await?;
        println!("{} Stack stopped", "✓".green());
        Ok(())
    }

    pub async fn restart(&self) -> Result<(), StackError> {
        self.compose_for_change().await?.restart().await?;
        println!("{} Stack restarted", "✓".green());
        self.info().await
    }

    pub async fn status(&self) -> Result<(), StackError> {
        self.compose().await?.ps().await
    }

    pub async fn logs(&self, service: Option<&str>) -> Result<(), StackError> {
        self.compose().await?.logs(service).await
    }

    /// Stop the stack and remove its volumes. Irreversible.
    pub async fn clean(&self) -> Result<(), StackError> {
        self.compose_for_change().await?.clean().await?;
        println!("{} Stack stopped and volumes removed", "✓".green());
        Ok(())
    }

    pub async fn endpoints(&self) -> Endpoints {
        let host = resolve_host_address(&self.config, &self.runner).await;
        Endpoints::new(&self.config, host.as_deref())
    }

    pub async fn info(&self) -> Result<(), StackError> {
        let endpoints = self.endpoints().await;
        print!("{}", endpoints::format_summary(&endpoints, &self.config));
        Ok(())
    }

    /// Open the dashboards locally. Unknown host falls back to localhost.
    pub async fn open(&self) -> Result<(), StackError> {
        let host = resolve_host_address(&self.config, &self.runner)
            .await
            .unwrap_or_else(|| "localhost".to_string());
        let endpoints = Endpoints::new(&self.config, Some(host.as_str()));
        endpoints::open_in_browser(&endpoints, &self.runner).await;
        Ok(())
    }

    /// Run the probe sequence. Requires a known host address.
    pub async fn health_report(&self) -> Result<(HealthReport, Endpoints), StackError> {
        let host = resolve_host_address(&self.config, &self.runner)
            .await
            .ok_or(StackError::HostUnresolved)?;
        let endpoints = Endpoints::new(&self.config, Some(host.as_str()));
        let report = HealthChecker::new(&self.probe, &endpoints).run().await;
        Ok((report, endpoints))
    }

    pub async fn test(&self, json: bool) -> Result<(), StackError> {
        let (report, endpoints) = self.health_report().await?;

        if json {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| StackError::Io(std::io::Error::other(e)))?;
            println!("{}", rendered);
        } else {
            println!("Checking stack health...");
            print!("{}", health::format_report(&report));
            if report.passed() {
                println!();
                print!("{}", endpoints::format_summary(&endpoints, &self.config));
            }
        }

        if report.passed() {
            Ok(())
        } else {
            Err(StackError::HealthCheckFailed(report.failures()))
        }
    }
}
