//! External command execution.
//!
//! Every subprocess the controller starts (compose tool, route lookup,
//! browser launcher) goes through [`CommandRunner`], so command logic can be
//! exercised against a recording fake instead of real binaries.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment variables layered over the inherited environment
    pub envs: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Command line as a user would type it (environment omitted).
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    /// `None` means the process was terminated by a signal.
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self::from_code(status.code())
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Captured result of a command run for its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub status: CommandStatus,
    pub stdout: String,
}

/// Capability to run external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with inherited stdio and wait for exit.
    async fn run(&self, invocation: &Invocation) -> std::io::Result<CommandStatus>;

    /// Run with stdout captured and stderr discarded.
    async fn capture(&self, invocation: &Invocation) -> std::io::Result<CapturedOutput>;

    /// Whether `program` can be found on PATH.
    async fn is_available(&self, program: &str) -> bool;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.envs(invocation.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<CommandStatus> {
        tracing::debug!(command = %invocation.command_line(), "Running command");
        let status = Self::command(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        tracing::debug!(command = %invocation.command_line(), code = ?status.code(), "Command finished");
        Ok(status.into())
    }

    async fn capture(&self, invocation: &Invocation) -> std::io::Result<CapturedOutput> {
        tracing::debug!(command = %invocation.command_line(), "Capturing command output");
        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await?;
        Ok(CapturedOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    async fn is_available(&self, program: &str) -> bool {
        // Same lookup a shell would do
        match self.capture(&Invocation::new("which").arg(program)).await {
            Ok(output) => output.status.is_success() && !output.stdout.trim().is_empty(),
            Err(_) => false,
        }
    }
}
